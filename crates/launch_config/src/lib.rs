//! Hierarchical TOML configuration for the launch monitor.
//!
//! Generalizes the `odal` pattern (a typed struct per section, loaded with an optional
//! machine-specific overlay merged over a checked-in default) with the dotted-path runtime
//! lookup the launch monitor's `teebox-cli` needs for one-off overrides
//! (`--gain camera1=4.2`, `--ball-center x,y,z`) without a recompile.

mod error;
mod path;

pub use error::{ConfigKind, Error, ErrorKind, Result};
pub use path::LaunchConfig;

use std::any::type_name;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use toml::Table;

/// A typed configuration section backed by a TOML file, with an optional machine-local overlay.
pub trait Config: for<'de> Deserialize<'de> + Serialize {
    /// Path (relative to a config root) this section is loaded from.
    const PATH: &'static str;

    fn name() -> &'static str {
        type_name::<Self>()
    }

    /// Load this section from `path` alone, with no overlay.
    fn load_without_overlay(path: impl AsRef<Path>) -> Result<Self> {
        let main = load_table::<Self>(path, ConfigKind::Main)?;
        main.try_into()
            .map_err(|e| Error::from_kind::<Self>(ErrorKind::Deserialize(e)))
    }

    /// Load this section from `main_path`, then merge `overlay_path` over it. The overlay may
    /// not introduce keys the main config doesn't already have, and may not change a value's
    /// type — both are treated as configuration mistakes, not silent overrides.
    fn load_with_overlay(main_path: impl AsRef<Path>, overlay_path: impl AsRef<Path>) -> Result<Self> {
        let mut main = load_table::<Self>(main_path, ConfigKind::Main)?;
        let mut overlay = load_table::<Self>(overlay_path, ConfigKind::Overlay)?;

        Self::merge_tables(&mut main, &mut overlay)?;

        main.try_into()
            .map_err(|e| Error::from_kind::<Self>(ErrorKind::Deserialize(e)))
    }

    /// Load from `main_path`, overlaying `overlay_path` only if it exists on disk.
    fn load_with_optional_overlay(main_path: impl AsRef<Path>, overlay_path: impl AsRef<Path>) -> Result<Self> {
        if overlay_path.as_ref().join(Self::PATH).exists() {
            Self::load_with_overlay(main_path, overlay_path)
        } else {
            Self::load_without_overlay(main_path)
        }
    }

    fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let config_string = toml::to_string_pretty(self).map_err(|e| Error::from_kind::<Self>(ErrorKind::Serialize(e)))?;

        fs::write(path, config_string).map_err(|e| {
            Error::from_kind::<Self>(ErrorKind::StoreIo {
                path: path.display().to_string(),
                source: e,
            })
        })
    }

    fn merge_tables(main: &mut Table, overlay: &mut Table) -> Result<()> {
        for (key, value) in overlay.iter() {
            if !main.contains_key(key) {
                return Err(Error::from_kind::<Self>(ErrorKind::ExtraKey {
                    key: key.to_string(),
                    value: value.clone(),
                }));
            }
        }

        for (key, value) in main.iter_mut() {
            let Some(overlay_value) = overlay.get_mut(key) else {
                continue;
            };

            if std::mem::discriminant(value) != std::mem::discriminant(overlay_value) {
                return Err(Error::from_kind::<Self>(ErrorKind::TypeMismatch {
                    key: key.to_string(),
                    main_value: value.clone(),
                    overlay_value: overlay_value.clone(),
                }));
            }

            if value.is_table() {
                Self::merge_tables(value.as_table_mut().unwrap(), overlay_value.as_table_mut().unwrap()).map_err(|e| {
                    Error::from_kind::<Self>(ErrorKind::Subtable {
                        key: key.clone(),
                        source: Box::new(e.kind),
                    })
                })?;
            } else {
                std::mem::swap(value, overlay_value);
            }
        }

        Ok(())
    }
}

fn load_table<T: Config>(path: impl AsRef<Path>, config_kind: ConfigKind) -> Result<Table> {
    let full_path = path.as_ref().join(T::PATH);

    fs::read_to_string(&full_path)
        .map_err(|e| {
            Error::from_kind::<T>(ErrorKind::ReadIo {
                path: full_path.display().to_string(),
                config_kind,
                source: e,
            })
        })?
        .parse()
        .map_err(|e| Error::from_kind::<T>(ErrorKind::Deserialize(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::io::Write;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Camera {
        gain: f64,
        exposure_us: u32,
    }

    impl Config for Camera {
        const PATH: &'static str = "camera.toml";
    }

    #[test]
    fn load_without_overlay_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("camera.toml")).unwrap();
        write!(file, "gain = 4.2\nexposure_us = 2500\n").unwrap();

        let camera = Camera::load_without_overlay(dir.path()).unwrap();
        assert_eq!(
            camera,
            Camera {
                gain: 4.2,
                exposure_us: 2500
            }
        );
    }

    #[test]
    fn overlay_with_unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("camera.toml"), "gain = 4.2\nexposure_us = 2500\n").unwrap();

        let overlay_dir = tempfile::tempdir().unwrap();
        fs::write(
            overlay_dir.path().join("camera.toml"),
            "gain = 5.0\nexposure_us = 2500\nlens = \"wide\"\n",
        )
        .unwrap();

        let err = Camera::load_with_overlay(dir.path(), overlay_dir.path()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ExtraKey { .. }));
    }

    #[test]
    fn overlay_type_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("camera.toml"), "gain = 4.2\nexposure_us = 2500\n").unwrap();

        let overlay_dir = tempfile::tempdir().unwrap();
        fs::write(overlay_dir.path().join("camera.toml"), "gain = \"bright\"\nexposure_us = 2500\n").unwrap();

        let err = Camera::load_with_overlay(dir.path(), overlay_dir.path()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    }
}
