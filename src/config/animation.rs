use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    #[default]
    EaseOutQuart,
    EaseOutBounce,
}

pub const DEFAULT_ANIMATION_DURATION_MS: u32 = 750;

/// All-or-nothing animation toggle.
///
/// Serializes as the literal string `"off"` when disabled and as
/// `{"duration": .., "easing": ..}` when enabled, so consumers must accept
/// both shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "AnimationRepr")]
pub enum AnimationSetting {
    Off,
    Enabled { duration_ms: u32, easing: Easing },
}

impl Default for AnimationSetting {
    fn default() -> Self {
        Self::Enabled {
            duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl AnimationSetting {
    #[must_use]
    pub fn enabled(duration_ms: u32, easing: Easing) -> Self {
        Self::Enabled {
            duration_ms,
            easing,
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

impl Serialize for AnimationSetting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Off => serializer.serialize_str("off"),
            Self::Enabled {
                duration_ms,
                easing,
            } => {
                let mut state = serializer.serialize_struct("Animation", 2)?;
                state.serialize_field("duration", duration_ms)?;
                state.serialize_field("easing", easing)?;
                state.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnimationRepr {
    Keyword(String),
    Flag(bool),
    Spec {
        duration: u32,
        #[serde(default)]
        easing: Easing,
    },
}

impl TryFrom<AnimationRepr> for AnimationSetting {
    type Error = String;

    fn try_from(repr: AnimationRepr) -> Result<Self, Self::Error> {
        match repr {
            AnimationRepr::Flag(false) => Ok(Self::Off),
            AnimationRepr::Flag(true) => Ok(Self::default()),
            AnimationRepr::Keyword(keyword) => match keyword.trim().to_ascii_lowercase().as_str() {
                "off" | "none" | "false" => Ok(Self::Off),
                "on" | "default" | "true" => Ok(Self::default()),
                other => Err(format!("unsupported animation keyword `{other}`")),
            },
            AnimationRepr::Spec { duration, easing } => Ok(Self::enabled(duration, easing)),
        }
    }
}
