use carve_animation::FieldSpec;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::glitch::GlitchSpec;
use crate::marker::MarkerSpec;

/// Declarative scene description, loaded from TOML.
///
/// Markers keep their document order, which is also their mount order.
/// Parsing is the one place in the engine where bad input is reported
/// instead of clamped: an authoring mistake should fail loudly at load
/// time, not degrade into invisible motion at runtime.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    pub markers: IndexMap<String, MarkerSpec>,
    pub field: Option<FieldManifest>,
    pub glitch: Option<GlitchManifest>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldManifest {
    pub count: usize,
    pub spec: FieldSpec,
}

impl Default for FieldManifest {
    fn default() -> Self {
        Self {
            count: 6,
            spec: FieldSpec::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct GlitchManifest {
    pub text: String,
    #[serde(default)]
    pub spec: GlitchSpec,
}

impl SceneManifest {
    pub fn from_toml_str(input: &str) -> Result<Self, ManifestError> {
        let manifest: SceneManifest = toml::from_str(input).map_err(ManifestError::Parse)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), ManifestError> {
        for (name, spec) in &self.markers {
            let invalid = |reason| ManifestError::InvalidMarker {
                name: name.clone(),
                reason,
            };
            if let Some(follow) = spec.follow {
                if !(follow.factor > 0.0 && follow.factor <= 1.0) {
                    return Err(invalid("follow factor must be in (0, 1]"));
                }
            }
            if let Some(repel) = spec.repel {
                if repel.radius <= 0.0 {
                    return Err(invalid("repel radius must be positive"));
                }
                if repel.strength < 0.0 {
                    return Err(invalid("repel strength must not be negative"));
                }
            }
            if let Some(drift) = &spec.drift {
                if !drift.is_static() && drift.duration_millis == 0 {
                    return Err(invalid("drift duration must be positive"));
                }
            }
            if spec.hover_scale <= 0.0 || spec.press_scale <= 0.0 {
                return Err(invalid("hover/press scale must be positive"));
            }
            if !(spec.scale_factor > 0.0 && spec.scale_factor <= 1.0) {
                return Err(invalid("scale factor must be in (0, 1]"));
            }
        }

        if let Some(field) = &self.field {
            if field.count == 0 {
                return Err(ManifestError::InvalidField {
                    reason: "particle count must be positive",
                });
            }
            if field.spec.radius <= 0.0 {
                return Err(ManifestError::InvalidField {
                    reason: "influence radius must be positive",
                });
            }
            if !(field.spec.friction > 0.0 && field.spec.friction <= 1.0) {
                return Err(ManifestError::InvalidField {
                    reason: "friction must be in (0, 1]",
                });
            }
            if !(0.0..=1.0).contains(&field.spec.restitution) {
                return Err(ManifestError::InvalidField {
                    reason: "restitution must be in [0, 1]",
                });
            }
        }

        if let Some(glitch) = &self.glitch {
            if glitch.text.is_empty() {
                return Err(ManifestError::InvalidGlitch {
                    reason: "text must not be empty",
                });
            }
            if glitch.spec.charset.is_empty() {
                return Err(ManifestError::InvalidGlitch {
                    reason: "charset must not be empty",
                });
            }
            if glitch.spec.steps == 0 || glitch.spec.max_chars == 0 {
                return Err(ManifestError::InvalidGlitch {
                    reason: "steps and max_chars must be positive",
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub enum ManifestError {
    Parse(toml::de::Error),
    InvalidMarker {
        name: String,
        reason: &'static str,
    },
    InvalidField {
        reason: &'static str,
    },
    InvalidGlitch {
        reason: &'static str,
    },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::Parse(err) => write!(f, "scene manifest is not valid TOML: {err}"),
            ManifestError::InvalidMarker { name, reason } => {
                write!(f, "marker {name:?}: {reason}")
            }
            ManifestError::InvalidField { reason } => write!(f, "field: {reason}"),
            ManifestError::InvalidGlitch { reason } => write!(f, "glitch: {reason}"),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Parse(err) => Some(err),
            _ => None,
        }
    }
}
