use ubyte::{ByteUnit, ToByteUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// An upper limit on the size of incoming request bodies.
///
/// Check out the documentation of [`BufferedBody`](crate::request::body::BufferedBody) for more details.
///
/// # Configuration
///
/// In configuration files the limit is represented as a map:
///
/// ```yaml
/// body_size_limit:
///   enabled: true
///   max_size: "2 MB"
/// ```
pub enum BodySizeLimit {
    /// There is an active limit on the size of incoming request bodies.
    Enabled {
        /// The maximum size of incoming request bodies, in bytes.
        max_size: ByteUnit,
    },
    /// There is no limit on the size of incoming request bodies.
    Disabled,
}

impl Default for BodySizeLimit {
    fn default() -> Self {
        Self::Enabled {
            max_size: 2.megabytes(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
struct BodySizeLimitRepr {
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default = "default_max_size")]
    max_size: ByteUnit,
}

fn enabled_by_default() -> bool {
    true
}

fn default_max_size() -> ByteUnit {
    2.megabytes()
}

impl serde::Serialize for BodySizeLimit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let repr = match *self {
            BodySizeLimit::Enabled { max_size } => BodySizeLimitRepr {
                enabled: true,
                max_size,
            },
            BodySizeLimit::Disabled => BodySizeLimitRepr {
                enabled: false,
                max_size: default_max_size(),
            },
        };
        repr.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for BodySizeLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = BodySizeLimitRepr::deserialize(deserializer)?;
        if repr.enabled {
            Ok(Self::Enabled {
                max_size: repr.max_size,
            })
        } else {
            Ok(Self::Disabled)
        }
    }
}
