//! Site settings business logic.
//!
//! A small compiled catalog declares which keys an administrator can change,
//! their display group, and how the form renders them (dropdown or free text).
//! Stored overrides in the `site_config` table win over the compiled defaults
//! from config.toml; clearing an override falls back to the default. Compiled
//! defaults are resolved with the pure lookup on
//! [`SiteDefaults::compiled_default`], so computing the form view never
//! touches live configuration state.

use crate::{
    config::site::{SiteDefaults, keys},
    entities::{SiteConfig, site_config},
    errors::Result,
    events::Notice,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use std::collections::HashMap;
use tracing::info;

/// Sentinel value meaning "use the compiled default", both as a submitted
/// form value and as the displayed selection for keys without an override.
pub const DEFAULT_SENTINEL: &str = "default";

/// One selectable value with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Stored value
    pub value: String,
    /// Label shown in the dropdown
    pub label: String,
}

impl Choice {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Form kind of a declared setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingKind {
    /// Enumerated values rendered as a dropdown
    Select {
        /// The valid choices, in display order
        choices: Vec<Choice>,
    },
    /// Free-form text input
    Text,
}

/// A compiled-in description of one configurable key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDeclaration {
    /// Dotted configuration key, e.g. `site.date_format`
    pub key: &'static str,
    /// Display group the settings form sections by
    pub group: &'static str,
    /// How the form renders this key
    pub kind: SettingKind,
}

/// Date formats an administrator can choose from.
#[must_use]
pub fn valid_date_formats() -> Vec<Choice> {
    vec![
        Choice::new("%Y-%m-%d", "ISO 8601: 2009-06-27"),
        Choice::new("%-m/%-d/%Y", "US: 06/27/2009"),
        Choice::new("%d-%m-%Y", "Europe: 27-06-2009"),
    ]
}

/// Time formats an administrator can choose from.
#[must_use]
pub fn valid_time_formats() -> Vec<Choice> {
    vec![
        Choice::new("%-I:%M %p", "12 Hour, 1:15 PM"),
        Choice::new("%H:%M", "24 Hour, 13:15"),
    ]
}

/// The compiled catalog of administrator-configurable settings.
#[must_use]
pub fn site_setting_declarations() -> Vec<SettingDeclaration> {
    vec![
        SettingDeclaration {
            key: keys::DATE_FORMAT,
            group: "date_time",
            kind: SettingKind::Select {
                choices: valid_date_formats(),
            },
        },
        SettingDeclaration {
            key: keys::TIME_FORMAT,
            group: "date_time",
            kind: SettingKind::Select {
                choices: valid_time_formats(),
            },
        },
        SettingDeclaration {
            key: keys::GOOGLE_ANALYTICS_PROPERTY_ID,
            group: "google_analytics",
            kind: SettingKind::Text,
        },
    ]
}

/// Splits a dotted key into its (group, key) storage coordinates.
fn split_key(key: &str) -> (&str, &str) {
    key.split_once('.').unwrap_or(("", key))
}

/// `Default (<label>)`, or `Default (none)` when there is nothing to show.
fn make_default_string(label: Option<&str>) -> String {
    format!("Default ({})", label.unwrap_or("none"))
}

/// The synthesized "use the default" dropdown entry.
///
/// Its label embeds the compiled default's own label; a compiled default that
/// is not one of the declared choices (including an unset one) shows as
/// `Unknown`.
fn default_choice(choices: &[Choice], compiled: Option<&str>) -> Choice {
    let label = compiled
        .and_then(|value| choices.iter().find(|choice| choice.value == value))
        .map_or_else(
            || "Unknown".to_string(),
            |choice| make_default_string(Some(choice.label.as_str())),
        );
    Choice {
        value: DEFAULT_SENTINEL.to_string(),
        label,
    }
}

/// Rendering hints for one settings form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOptions {
    /// Dropdown choices, the synthesized default entry first
    Choices(Vec<Choice>),
    /// Placeholder text describing the compiled default
    Placeholder(String),
}

/// Everything the settings form needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    /// Current value per declared key. Selects without an override fall back
    /// to [`DEFAULT_SENTINEL`], text fields to `None`.
    pub current: HashMap<String, Option<String>>,
    /// Declarations grouped by display group, catalog order preserved; each
    /// item keeps its key
    pub grouped: Vec<(String, Vec<SettingDeclaration>)>,
    /// Per-key rendering hints
    pub options: HashMap<String, FieldOptions>,
}

async fn load_overrides(db: &DatabaseConnection) -> Result<HashMap<String, String>> {
    Ok(SiteConfig::find()
        .all(db)
        .await?
        .into_iter()
        .map(|row| (format!("{}.{}", row.group, row.key), row.value))
        .collect())
}

/// Computes the current value and form options for every declared setting.
pub async fn resolve_settings_view(
    db: &DatabaseConnection,
    defaults: &SiteDefaults,
) -> Result<SettingsView> {
    let declarations = site_setting_declarations();
    let overrides = load_overrides(db).await?;

    let mut current = HashMap::new();
    let mut options = HashMap::new();

    for declaration in &declarations {
        let stored = overrides.get(declaration.key).cloned();
        let compiled = defaults.compiled_default(declaration.key);

        match &declaration.kind {
            SettingKind::Select { choices } => {
                current.insert(
                    declaration.key.to_string(),
                    Some(stored.unwrap_or_else(|| DEFAULT_SENTINEL.to_string())),
                );

                let mut rendered = Vec::with_capacity(choices.len() + 1);
                rendered.push(default_choice(choices, compiled));
                rendered.extend(choices.iter().cloned());
                options.insert(declaration.key.to_string(), FieldOptions::Choices(rendered));
            }
            SettingKind::Text => {
                current.insert(declaration.key.to_string(), stored);
                options.insert(
                    declaration.key.to_string(),
                    FieldOptions::Placeholder(make_default_string(compiled)),
                );
            }
        }
    }

    let grouped = group_declarations(declarations);
    Ok(SettingsView {
        current,
        grouped,
        options,
    })
}

/// Groups declarations by display group, keeping catalog order.
fn group_declarations(
    declarations: Vec<SettingDeclaration>,
) -> Vec<(String, Vec<SettingDeclaration>)> {
    let mut grouped: Vec<(String, Vec<SettingDeclaration>)> = Vec::new();
    for declaration in declarations {
        match grouped
            .iter_mut()
            .find(|(group, _)| group.as_str() == declaration.group)
        {
            Some((_, items)) => items.push(declaration),
            None => grouped.push((declaration.group.to_string(), vec![declaration])),
        }
    }
    grouped
}

/// Result of applying a settings form submission.
#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    /// Keys whose override was created or replaced
    pub applied: Vec<String>,
    /// Keys whose override was removed
    pub cleared: Vec<String>,
    /// Confirmations for the web layer to surface
    pub notices: Vec<Notice>,
}

/// Applies one settings form submission.
///
/// Keys are processed independently: an empty or [`DEFAULT_SENTINEL`] value
/// clears the stored override (a no-op when none exists), anything else
/// upserts it. Submitted keys outside the compiled catalog are ignored.
/// Callers holding a [`crate::cache::SiteOverlayCache`] refresh it after a
/// successful update.
pub async fn apply_settings_update(
    db: &DatabaseConnection,
    submitted: &HashMap<String, String>,
) -> Result<SettingsUpdate> {
    let mut applied = Vec::new();
    let mut cleared = Vec::new();

    for declaration in site_setting_declarations() {
        let input = submitted
            .get(declaration.key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty());
        let (group, key) = split_key(declaration.key);

        match input {
            None | Some(DEFAULT_SENTINEL) => {
                if delete_override(db, group, key).await? {
                    cleared.push(declaration.key.to_string());
                }
            }
            Some(value) => {
                upsert_override(db, group, key, value).await?;
                applied.push(declaration.key.to_string());
            }
        }
    }

    info!(
        applied = applied.len(),
        cleared = cleared.len(),
        "site settings updated"
    );
    Ok(SettingsUpdate {
        applied,
        cleared,
        notices: vec![Notice::SettingsUpdated],
    })
}

async fn upsert_override(
    db: &DatabaseConnection,
    group: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    let now = Utc::now().naive_utc();

    match SiteConfig::find_by_id((group.to_string(), key.to_string()))
        .one(db)
        .await?
    {
        Some(existing) => {
            let mut active: site_config::ActiveModel = existing.into();
            active.value = Set(value.to_string());
            active.updated_at = Set(now);
            active.update(db).await?;
        }
        None => {
            let fresh = site_config::ActiveModel {
                group: Set(group.to_string()),
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
            };
            fresh.insert(db).await?;
        }
    }

    Ok(())
}

/// Deletes the override row, reporting whether one existed.
async fn delete_override(db: &DatabaseConnection, group: &str, key: &str) -> Result<bool> {
    let result = SiteConfig::delete_many()
        .filter(site_config::Column::Group.eq(group))
        .filter(site_config::Column::Key.eq(key))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// The effective configuration: compiled defaults overlaid with stored
/// overrides. Only declared keys appear; keys with neither an override nor a
/// compiled default are absent.
pub async fn load_site_overlay(
    db: &DatabaseConnection,
    defaults: &SiteDefaults,
) -> Result<HashMap<String, String>> {
    let overrides = load_overrides(db).await?;

    let mut overlay = HashMap::new();
    for declaration in site_setting_declarations() {
        let effective = overrides
            .get(declaration.key)
            .map(String::as_str)
            .or_else(|| defaults.compiled_default(declaration.key));
        if let Some(value) = effective {
            overlay.insert(declaration.key.to_string(), value.to_string());
        }
    }
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]
    use super::*;
    use crate::test_utils::*;

    fn submission(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("site.date_format"), ("site", "date_format"));
        assert_eq!(split_key("bare"), ("", "bare"));
    }

    #[test]
    fn test_default_choice_labels() {
        let choices = valid_date_formats();

        // Compiled default is a declared choice: its label is embedded.
        let entry = default_choice(&choices, Some("%Y-%m-%d"));
        assert_eq!(entry.value, DEFAULT_SENTINEL);
        assert_eq!(entry.label, "Default (ISO 8601: 2009-06-27)");

        // Compiled default is not a declared choice.
        let entry = default_choice(&choices, Some("%d.%m.%Y"));
        assert_eq!(entry.label, "Unknown");

        // No compiled default at all.
        let entry = default_choice(&choices, None);
        assert_eq!(entry.label, "Unknown");
    }

    #[test]
    fn test_make_default_string() {
        assert_eq!(make_default_string(Some("UA-1")), "Default (UA-1)");
        assert_eq!(make_default_string(None), "Default (none)");
    }

    #[test]
    fn test_grouping_keeps_keys_and_order() {
        let grouped = group_declarations(site_setting_declarations());

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "date_time");
        let keys: Vec<&str> = grouped[0].1.iter().map(|d| d.key).collect();
        assert_eq!(keys, [keys::DATE_FORMAT, keys::TIME_FORMAT]);

        assert_eq!(grouped[1].0, "google_analytics");
        assert_eq!(grouped[1].1[0].key, keys::GOOGLE_ANALYTICS_PROPERTY_ID);
    }

    #[tokio::test]
    async fn test_resolve_without_overrides() -> Result<()> {
        let db = setup_test_db().await?;
        let defaults = test_defaults();

        let view = resolve_settings_view(&db, &defaults).await?;

        // Selects fall back to the sentinel, text fields to None.
        assert_eq!(
            view.current.get(keys::DATE_FORMAT).unwrap().as_deref(),
            Some(DEFAULT_SENTINEL)
        );
        assert_eq!(
            view.current
                .get(keys::GOOGLE_ANALYTICS_PROPERTY_ID)
                .unwrap(),
            &None
        );

        // The default entry leads the dropdown and embeds the default's label.
        match view.options.get(keys::DATE_FORMAT).unwrap() {
            FieldOptions::Choices(choices) => {
                assert_eq!(choices[0].value, DEFAULT_SENTINEL);
                assert_eq!(choices[0].label, "Default (ISO 8601: 2009-06-27)");
                assert_eq!(choices.len(), valid_date_formats().len() + 1);
            }
            FieldOptions::Placeholder(_) => panic!("date format should be a select"),
        }

        // Text field placeholder names the (absent) compiled default.
        assert_eq!(
            view.options.get(keys::GOOGLE_ANALYTICS_PROPERTY_ID).unwrap(),
            &FieldOptions::Placeholder("Default (none)".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_with_override() -> Result<()> {
        let db = setup_test_db().await?;
        let defaults = test_defaults();

        apply_settings_update(&db, &submission(&[(keys::DATE_FORMAT, "%d-%m-%Y")])).await?;

        let view = resolve_settings_view(&db, &defaults).await?;
        assert_eq!(
            view.current.get(keys::DATE_FORMAT).unwrap().as_deref(),
            Some("%d-%m-%Y")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_with_unknown_compiled_default() -> Result<()> {
        let db = setup_test_db().await?;
        let defaults = crate::config::site::SiteDefaults {
            date_format: Some("%d.%m.%Y".to_string()),
            ..test_defaults()
        };

        let view = resolve_settings_view(&db, &defaults).await?;
        match view.options.get(keys::DATE_FORMAT).unwrap() {
            FieldOptions::Choices(choices) => assert_eq!(choices[0].label, "Unknown"),
            FieldOptions::Placeholder(_) => panic!("date format should be a select"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_apply_upserts_and_clears_independently() -> Result<()> {
        let db = setup_test_db().await?;

        let update = apply_settings_update(
            &db,
            &submission(&[
                (keys::DATE_FORMAT, "%d-%m-%Y"),
                (keys::TIME_FORMAT, "%H:%M"),
            ]),
        )
        .await?;
        assert_eq!(update.applied.len(), 2);
        assert!(update.cleared.is_empty());
        assert_eq!(update.notices, [Notice::SettingsUpdated]);

        // One key reverts to default, the other changes; both in one submission.
        let update = apply_settings_update(
            &db,
            &submission(&[
                (keys::DATE_FORMAT, DEFAULT_SENTINEL),
                (keys::TIME_FORMAT, "%-I:%M %p"),
            ]),
        )
        .await?;
        assert_eq!(update.cleared, [keys::DATE_FORMAT.to_string()]);
        assert_eq!(update.applied, [keys::TIME_FORMAT.to_string()]);

        let view = resolve_settings_view(&db, &test_defaults()).await?;
        assert_eq!(
            view.current.get(keys::DATE_FORMAT).unwrap().as_deref(),
            Some(DEFAULT_SENTINEL)
        );
        assert_eq!(
            view.current.get(keys::TIME_FORMAT).unwrap().as_deref(),
            Some("%-I:%M %p")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_apply_empty_value_clears_override() -> Result<()> {
        let db = setup_test_db().await?;

        apply_settings_update(&db, &submission(&[(keys::GOOGLE_ANALYTICS_PROPERTY_ID, "UA-1")]))
            .await?;
        let update =
            apply_settings_update(&db, &submission(&[(keys::GOOGLE_ANALYTICS_PROPERTY_ID, "")]))
                .await?;
        assert_eq!(update.cleared, [keys::GOOGLE_ANALYTICS_PROPERTY_ID.to_string()]);

        let view = resolve_settings_view(&db, &test_defaults()).await?;
        assert_eq!(
            view.current
                .get(keys::GOOGLE_ANALYTICS_PROPERTY_ID)
                .unwrap(),
            &None
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_clearing_absent_override_is_a_noop() -> Result<()> {
        let db = setup_test_db().await?;

        let update =
            apply_settings_update(&db, &submission(&[(keys::DATE_FORMAT, DEFAULT_SENTINEL)]))
                .await?;
        assert!(update.cleared.is_empty());
        assert!(update.applied.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_undeclared_keys_are_ignored() -> Result<()> {
        let db = setup_test_db().await?;

        let update = apply_settings_update(
            &db,
            &submission(&[("site.not_a_setting", "value"), (keys::TIME_FORMAT, "%H:%M")]),
        )
        .await?;
        assert_eq!(update.applied, [keys::TIME_FORMAT.to_string()]);

        let overrides = load_overrides(&db).await?;
        assert!(!overrides.contains_key("site.not_a_setting"));

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_override() -> Result<()> {
        let db = setup_test_db().await?;

        apply_settings_update(&db, &submission(&[(keys::DATE_FORMAT, "%d-%m-%Y")])).await?;
        apply_settings_update(&db, &submission(&[(keys::DATE_FORMAT, "%-m/%-d/%Y")])).await?;

        let overrides = load_overrides(&db).await?;
        assert_eq!(overrides.get(keys::DATE_FORMAT).unwrap(), "%-m/%-d/%Y");
        assert_eq!(overrides.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_overlay_merges_defaults_and_overrides() -> Result<()> {
        let db = setup_test_db().await?;
        let defaults = test_defaults();

        apply_settings_update(&db, &submission(&[(keys::TIME_FORMAT, "%-I:%M %p")])).await?;

        let overlay = load_site_overlay(&db, &defaults).await?;
        // Override wins.
        assert_eq!(overlay.get(keys::TIME_FORMAT).unwrap(), "%-I:%M %p");
        // Compiled default fills the gap.
        assert_eq!(overlay.get(keys::DATE_FORMAT).unwrap(), "%Y-%m-%d");
        // Neither override nor default: absent.
        assert!(!overlay.contains_key(keys::GOOGLE_ANALYTICS_PROPERTY_ID));

        Ok(())
    }
}
