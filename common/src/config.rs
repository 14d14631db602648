use std::{collections::HashMap, path::Path, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use hocon::{Hocon, HoconLoader};

/// Loads configuration from a HOCON file with a named scope. Environment
/// variables take precedence over file values, then scoped keys, then
/// top-level keys.
#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();
        assert!(path.is_file(), "The config file {:?} was not found", path);

        let env = std::env::vars().collect::<HashMap<_, _>>();

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()?;

        Ok(Self { hocon, env, scope })
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(name) {
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    pub fn get_relative_path(&self, name: &str) -> Result<PathBuf> {
        let value = self
            .get(name)
            .and_then(|v| v.as_string())
            .ok_or_else(|| anyhow!("Config key {} is not set", name))?;

        let path = PathBuf::from(value);

        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(std::env::current_dir()?.join(path))
        }
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        let res = T::load(self)?;
        Ok(res)
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Integer(i64) => Some(Value::Integer(*i64 as usize)),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Value {
    String(String),
    Integer(usize),
    Boolean(bool),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(val) => Some(*val),
            Value::String(val) => Hocon::String(val.clone()).as_bool(),
            _ => None,
        }
    }

    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => Some(*val),
            Value::String(val) => val.parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_values_convert() {
        let value = Value::String("42".to_string());

        assert_eq!(value.as_usize(), Some(42));
        assert_eq!(value.as_string(), Some("42".to_string()));
        assert_eq!(value.as_bool(), None);
    }

    #[test]
    fn test_boolean_values_convert() {
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::String("true".to_string()).as_bool(), Some(true));
        assert_eq!(Value::Boolean(false).as_string(), Some("false".to_string()));
    }

    #[test]
    fn test_integer_values_convert() {
        let value = Value::Integer(7);

        assert_eq!(value.as_usize(), Some(7));
        assert_eq!(value.as_string(), Some("7".to_string()));
        assert_eq!(value.as_bool(), None);
    }
}
