use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use hocon::{Hocon, HoconLoader};
use log::debug;

use super::FsExt;

#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(anyhow!("The config file was {:?} not found", path));
        }

        let env = std::env::vars().collect::<HashMap<_, _>>();

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()?;

        debug!("Loaded config {:?} with scope {}", path, scope);

        Ok(Self { hocon, env, scope })
    }

    pub fn from_hocon_str(contents: &str, scope: String) -> Result<Self> {
        let hocon = HoconLoader::new()
            .load_str(contents)
            .context("Failed to parse config")?
            .hocon()?;

        Ok(Self {
            hocon,
            env: HashMap::new(),
            scope,
        })
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

    /// Resolves a path valued key against the working directory, falling back to `default` when unset.
    pub fn get_relative_path(&self, name: &str, default: &str) -> Result<PathBuf> {
        let path = self
            .get(name)
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| default.to_string());

        path.relative_to_cwd()
            .with_context(|| format!("Failed to resolve path for {}", name))
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        let res = T::load(self)?;
        Ok(res)
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(f64) => Some(Value::Float(*f64 as f32)),
            Hocon::Integer(i64) => Some(Value::Integer(*i64 as usize)),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            Hocon::Array(items) => Some(Value::List(
                items.iter().filter_map(|item| item.as_string()).collect(),
            )),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Value {
    String(String),
    Integer(usize),
    Float(f32),
    Boolean(bool),
    List(Vec<String>),
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

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(val) => Some(*val),
            Value::Integer(val) => Some(*val as f32),
            Value::String(val) => val.parse::<f32>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
            Value::List(_) => None,
        }
    }

    /// Lists may come from a hocon array or, when overridden through the environment, a comma separated string.
    pub fn as_list(&self) -> Option<Vec<String>> {
        match self {
            Value::List(vals) => Some(vals.clone()),
            Value::String(val) => Some(
                val.split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .collect(),
            ),
            _ => None,
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

    const CONF: &str = r#"
        rounds = 3
        training {
            rounds = 10
            alpha = 0.25
            strategies = ["random", "QLearning"]
            mode = "concurrent"
        }
    "#;

    #[test]
    fn test_scoped_value_takes_precedence() {
        let config = ConfigLoader::from_hocon_str(CONF, "training".to_string()).unwrap();

        assert_eq!(config.get("rounds").and_then(|v| v.as_usize()), Some(10));
    }

    #[test]
    fn test_list_value() {
        let config = ConfigLoader::from_hocon_str(CONF, "training".to_string()).unwrap();

        assert_eq!(
            config.get("strategies").and_then(|v| v.as_list()),
            Some(vec!["random".to_string(), "QLearning".to_string()])
        );
    }

    #[test]
    fn test_comma_separated_string_as_list() {
        let value = Value::String("random, maximize,QLearning".to_string());

        assert_eq!(
            value.as_list(),
            Some(vec![
                "random".to_string(),
                "maximize".to_string(),
                "QLearning".to_string()
            ])
        );
    }

    #[test]
    fn test_missing_value() {
        let config = ConfigLoader::from_hocon_str(CONF, "training".to_string()).unwrap();

        assert!(config.get("epsilon").is_none());
    }

    #[test]
    fn test_relative_path_default() {
        let config = ConfigLoader::from_hocon_str(CONF, "training".to_string()).unwrap();
        let path = config.get_relative_path("table_dir", "./strategy").unwrap();

        assert!(path.is_absolute());
        assert!(path.ends_with("strategy"));
    }

    #[test]
    fn test_float_value() {
        let config = ConfigLoader::from_hocon_str(CONF, "training".to_string()).unwrap();

        assert_eq!(config.get("alpha").and_then(|v| v.as_f32()), Some(0.25));
    }
}
