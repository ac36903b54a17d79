use crate::error::SettingsError;

use super::model::{Settings, CURRENT_SCHEMA_VERSION};

/// Checks that `settings` can be applied as is.
///
/// Callers migrate older schemas first; a stale `schema_version` is an
/// error here, not something to fix up.
///
/// # Errors
///
/// - [`SettingsError::SchemaVersion`] when the schema is not current
/// - [`SettingsError::ZeroHistoryLimit`] when `history.limit` is 0
/// - [`SettingsError::ZeroSyncInterval`] when `sync.interval_secs` is 0
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(SettingsError::SchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: settings.schema_version,
        });
    }
    if settings.history.limit == 0 {
        return Err(SettingsError::ZeroHistoryLimit);
    }
    if settings.sync.interval_secs == 0 {
        return Err(SettingsError::ZeroSyncInterval);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate_settings(&Settings::default()), Ok(()));
    }

    #[test]
    fn zero_limit_is_rejected_not_clamped() {
        let mut settings = Settings::default();
        settings.history.limit = 0;
        assert_eq!(validate_settings(&settings), Err(SettingsError::ZeroHistoryLimit));
    }

    #[test]
    fn stale_schema_is_rejected() {
        let mut settings = Settings::default();
        settings.schema_version = 1;
        assert_eq!(
            validate_settings(&settings),
            Err(SettingsError::SchemaVersion {
                expected: CURRENT_SCHEMA_VERSION,
                found: 1
            })
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut settings = Settings::default();
        settings.sync.interval_secs = 0;
        assert_eq!(validate_settings(&settings), Err(SettingsError::ZeroSyncInterval));
    }
}
