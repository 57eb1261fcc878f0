use std::path::PathBuf;

use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::lib::errors::ConfigError;

/// One `[profile.<name>]` table with typed, all-optional fields.
///
/// Keys run-odoo does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub addons: Option<Vec<String>>,
    pub version: Option<f64>,
    pub enterprise: Option<bool>,
    pub themes: Option<bool>,
    pub db: Option<String>,
    pub path: Option<PathBuf>,
    pub extra_params: Option<String>,
    pub http_port: Option<u16>,
    pub http_interface: Option<String>,
    pub log_level: Option<String>,
    pub workers: Option<u32>,
    pub max_cron_threads: Option<u32>,
    pub db_host: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_port: Option<u16>,
    pub extra: Table,
}

impl Profile {
    /// Convert a raw profile table, naming the profile and field on type mismatches.
    pub fn from_table(name: &str, table: &Table) -> Result<Self, ConfigError> {
        let mut reader = FieldReader {
            profile: name,
            rest: table.clone(),
        };

        Ok(Self {
            addons: reader.addons()?,
            version: reader.take("version")?,
            enterprise: reader.take("enterprise")?,
            themes: reader.take("themes")?,
            db: reader.take("db")?,
            path: reader.take::<String>("path")?.map(expand_home),
            extra_params: reader.take("extra_params")?,
            http_port: reader.take("http_port")?,
            http_interface: reader.take("http_interface")?,
            log_level: reader.take("log_level")?,
            workers: reader.take("workers")?,
            max_cron_threads: reader.take("max_cron_threads")?,
            db_host: reader.take("db_host")?,
            db_user: reader.take("db_user")?,
            db_password: reader.take("db_password")?,
            db_port: reader.take("db_port")?,
            extra: reader.rest,
        })
    }

    /// True when no field at all was set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

struct FieldReader<'a> {
    profile: &'a str,
    rest: Table,
}

impl FieldReader<'_> {
    fn take<T: DeserializeOwned>(&mut self, field: &str) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.rest.remove(field) else {
            return Ok(None);
        };
        let type_name = value.type_str();
        value
            .try_into::<T>()
            .map(Some)
            .map_err(|err| self.invalid(field, format!("unexpected {type_name}: {err}")))
    }

    /// `addons` (or its singular alias `addon`) as a list or a comma-separated string.
    fn addons(&mut self) -> Result<Option<Vec<String>>, ConfigError> {
        let alias = self.rest.remove("addon");
        let (field, value) = match (self.rest.remove("addons"), alias) {
            (Some(value), _) => ("addons", value),
            (None, Some(value)) => ("addon", value),
            (None, None) => return Ok(None),
        };

        match value {
            Value::String(list) => Ok(Some(split_addons(&list))),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(name) => Ok(name.trim().to_string()),
                    other => Err(self.invalid(
                        field,
                        format!("addon names must be strings, found {}", other.type_str()),
                    )),
                })
                .filter(|name| !matches!(name, Ok(name) if name.is_empty()))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            other => Err(self.invalid(
                field,
                format!(
                    "expected a list of module names, found {}",
                    other.type_str()
                ),
            )),
        }
    }

    fn invalid(&self, field: &str, message: String) -> ConfigError {
        ConfigError::Field {
            profile: self.profile.to_string(),
            field: field.to_string(),
            message,
        }
    }
}

fn split_addons(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn expand_home(raw: String) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(&raw)),
        None => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(source: &str) -> Table {
        toml::from_str::<Table>(source).expect("test TOML should parse")
    }

    #[test]
    fn all_known_fields_are_typed() {
        let profile = Profile::from_table(
            "full",
            &table(
                r#"
addons = ["sale", "purchase"]
version = 17.0
enterprise = true
themes = false
db = "full_db"
path = "/custom/path"
extra_params = "--dev=all"
http_port = 8080
http_interface = "127.0.0.1"
log_level = "debug"
workers = 4
max_cron_threads = 2
db_host = "custom_host"
db_user = "custom_user"
db_password = "custom_pass"
db_port = 5433
"#,
            ),
        )
        .expect("profile should convert");

        assert_eq!(
            profile.addons,
            Some(vec!["sale".to_string(), "purchase".to_string()])
        );
        assert_eq!(profile.version, Some(17.0));
        assert_eq!(profile.enterprise, Some(true));
        assert_eq!(profile.themes, Some(false));
        assert_eq!(profile.path, Some(PathBuf::from("/custom/path")));
        assert_eq!(profile.http_port, Some(8080));
        assert_eq!(profile.workers, Some(4));
        assert_eq!(profile.max_cron_threads, Some(2));
        assert_eq!(profile.db_port, Some(5433));
        assert!(profile.extra.is_empty());
    }

    #[test]
    fn integer_version_is_accepted() {
        let profile =
            Profile::from_table("int", &table("version = 16")).expect("integer version converts");
        assert_eq!(profile.version, Some(16.0));
    }

    #[test]
    fn singular_addon_string_is_accepted() {
        let profile = Profile::from_table("mini", &table(r#"addon = "eighteen_module""#))
            .expect("addon alias converts");
        assert_eq!(profile.addons, Some(vec!["eighteen_module".to_string()]));
    }

    #[test]
    fn comma_separated_addons_are_split() {
        let profile = Profile::from_table("csv", &table(r#"addons = "sale, stock,,""#))
            .expect("comma list converts");
        assert_eq!(
            profile.addons,
            Some(vec!["sale".to_string(), "stock".to_string()])
        );
    }

    #[test]
    fn mistyped_field_names_profile_and_field() {
        let error = Profile::from_table("bad", &table(r#"http_port = "eighty""#))
            .expect_err("string port must fail");
        match error {
            ConfigError::Field { profile, field, .. } => {
                assert_eq!(profile, "bad");
                assert_eq!(field, "http_port");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_string_addon_is_rejected() {
        let error = Profile::from_table("bad", &table("addons = [\"sale\", 3]"))
            .expect_err("numeric addon must fail");
        assert!(matches!(error, ConfigError::Field { ref field, .. } if field == "addons"));
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let profile = Profile::from_table("extra", &table("python_version = \"3.12.0\""))
            .expect("unknown keys are not an error");
        assert_eq!(
            profile.extra.get("python_version").and_then(Value::as_str),
            Some("3.12.0")
        );
        assert!(!profile.is_empty());
    }
}
