//! Dotted-path runtime lookups over a parsed, frozen configuration table.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use toml::Value;

use crate::error::{ConfigKind, Error, ErrorKind};
use crate::Result;

/// The full merged configuration, frozen after load and shared between the watcher and flight
/// threads via [`Arc`]. Unlike [`Config`](crate::Config), which deserializes one TOML file into
/// one typed struct, `LaunchConfig` holds the whole tree and resolves `golf_sim.ball.radius_mm`
/// style paths against it, for the CLI's one-off `--set key=value` overrides.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    root: Arc<Value>,
}

impl LaunchConfig {
    /// Load the main config at `main_path`, then merge an overlay at `overlay_path` over it if
    /// the overlay file exists. Overlay values replace main values of the same dotted path
    /// regardless of table shape; unlike [`Config::merge_tables`](crate::Config::merge_tables)
    /// this permits the overlay to introduce new keys, since it backs ad-hoc CLI overrides
    /// rather than a checked-in machine profile.
    pub fn load(main_path: impl AsRef<Path>, overlay_path: Option<impl AsRef<Path>>) -> Result<Self> {
        let mut root = Self::read_toml(main_path.as_ref(), ConfigKind::Main)?;

        if let Some(overlay_path) = overlay_path {
            let overlay_path = overlay_path.as_ref();
            if overlay_path.exists() {
                let overlay = Self::read_toml(overlay_path, ConfigKind::Overlay)?;
                merge_in_place(&mut root, overlay);
            }
        }

        Ok(Self { root: Arc::new(root) })
    }

    fn read_toml(path: &Path, kind: ConfigKind) -> Result<Value> {
        let text = std::fs::read_to_string(path).map_err(|e| Error {
            name: "LaunchConfig".to_string(),
            kind: ErrorKind::ReadIo {
                path: path.display().to_string(),
                config_kind: kind,
                source: e,
            },
        })?;
        toml::from_str(&text).map_err(|e| Error {
            name: "LaunchConfig".to_string(),
            kind: ErrorKind::Deserialize(e),
        })
    }

    /// Apply a single `key.path=value` override, parsing `value` as TOML so numbers, bools, and
    /// strings all round-trip (the `--set` CLI flag's wire format).
    pub fn set_override(&mut self, dotted_path: &str, raw_value: &str) -> Result<()> {
        let value: Value = raw_value
            .parse()
            .unwrap_or_else(|_| Value::String(raw_value.to_string()));

        let root = Arc::make_mut(&mut self.root);
        set_at_path(root, dotted_path, value);
        Ok(())
    }

    /// Resolve a dotted path (`"golf_sim.ball.radius_mm"`) to a typed value, falling back to
    /// `default` if the path is absent.
    pub fn get_or<T: DeserializeOwned>(&self, dotted_path: &str, default: T) -> T {
        self.get(dotted_path).unwrap_or(default)
    }

    /// Resolve a dotted path to a typed value, returning `None` if any segment is missing.
    pub fn get<T: DeserializeOwned>(&self, dotted_path: &str) -> Option<T> {
        let value = get_at_path(&self.root, dotted_path)?;
        value.clone().try_into().ok()
    }

    /// Resolve a dotted path, erroring (rather than silently defaulting) when it's missing —
    /// for settings with no sensible built-in default, like the simulator host.
    pub fn require<T: DeserializeOwned>(&self, dotted_path: &str) -> Result<T> {
        self.get(dotted_path).ok_or_else(|| Error {
            name: "LaunchConfig".to_string(),
            kind: ErrorKind::MissingKey {
                path: dotted_path.to_string(),
            },
        })
    }

    /// Resolve a dotted path to a vector of `f64`, the shape `ball_detector`'s Hough parameter
    /// arrays and `spin_solver`'s search-grid bounds are configured with.
    pub fn get_vec(&self, dotted_path: &str) -> Result<Vec<f64>> {
        let value = get_at_path(&self.root, dotted_path).ok_or_else(|| Error {
            name: "LaunchConfig".to_string(),
            kind: ErrorKind::MissingKey {
                path: dotted_path.to_string(),
            },
        })?;

        value
            .as_array()
            .ok_or_else(|| Error {
                name: "LaunchConfig".to_string(),
                kind: ErrorKind::WrongShape {
                    path: dotted_path.to_string(),
                },
            })?
            .iter()
            .map(|item| {
                item.as_float()
                    .or_else(|| item.as_integer().map(|i| i as f64))
                    .ok_or_else(|| Error {
                        name: "LaunchConfig".to_string(),
                        kind: ErrorKind::WrongShape {
                            path: dotted_path.to_string(),
                        },
                    })
            })
            .collect()
    }
}

fn get_at_path<'a>(root: &'a Value, dotted_path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in dotted_path.split('.') {
        current = current.as_table()?.get(segment)?;
    }
    Some(current)
}

fn set_at_path(root: &mut Value, dotted_path: &str, new_value: Value) {
    let mut segments = dotted_path.split('.').peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if !current.is_table() {
            *current = Value::Table(toml::Table::new());
        }
        let table = current.as_table_mut().expect("just ensured table");

        if segments.peek().is_none() {
            table.insert(segment.to_string(), new_value);
            return;
        }

        current = table.entry(segment.to_string()).or_insert_with(|| Value::Table(toml::Table::new()));
    }
}

fn merge_in_place(main: &mut Value, overlay: Value) {
    match (main, overlay) {
        (Value::Table(main_table), Value::Table(overlay_table)) => {
            for (key, overlay_value) in overlay_table {
                match main_table.get_mut(&key) {
                    Some(main_value) => merge_in_place(main_value, overlay_value),
                    None => {
                        main_table.insert(key, overlay_value);
                    }
                }
            }
        }
        (main_value, overlay_value) => *main_value = overlay_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn resolves_nested_dotted_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("main.toml"),
            "[golf_sim.ball]\nradius_mm = 21.3\n",
        )
        .unwrap();

        let config = LaunchConfig::load(dir.path().join("main.toml"), None::<&Path>).unwrap();
        let radius: f64 = config.get("golf_sim.ball.radius_mm").unwrap();
        assert!((radius - 21.3).abs() < 1e-9);
    }

    #[test]
    fn missing_path_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.toml"), "[golf_sim.ball]\nradius_mm = 21.3\n").unwrap();

        let config = LaunchConfig::load(dir.path().join("main.toml"), None::<&Path>).unwrap();
        let gain: f64 = config.get_or("golf_sim.camera1.gain", 1.0);
        assert_eq!(gain, 1.0);
    }

    #[test]
    fn overlay_introduces_and_overrides_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.toml"), "[golf_sim.ball]\nradius_mm = 21.3\n").unwrap();
        fs::write(
            dir.path().join("overlay.toml"),
            "[golf_sim.ball]\nradius_mm = 25.0\n\n[golf_sim.camera1]\ngain = 3.5\n",
        )
        .unwrap();

        let config = LaunchConfig::load(dir.path().join("main.toml"), Some(dir.path().join("overlay.toml"))).unwrap();
        assert_eq!(config.get::<f64>("golf_sim.ball.radius_mm"), Some(25.0));
        assert_eq!(config.get::<f64>("golf_sim.camera1.gain"), Some(3.5));
    }

    #[test]
    fn set_override_writes_a_new_leaf() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.toml"), "[golf_sim.ball]\nradius_mm = 21.3\n").unwrap();

        let mut config = LaunchConfig::load(dir.path().join("main.toml"), None::<&Path>).unwrap();
        config.set_override("golf_sim.ball.radius_mm", "22.0").unwrap();
        assert_eq!(config.get::<f64>("golf_sim.ball.radius_mm"), Some(22.0));
    }
}
