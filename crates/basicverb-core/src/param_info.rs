//! Parameter descriptors for host-automatable controls.
//!
//! A [`ParamDescriptor`] carries everything a host or editor needs to present
//! and validate one parameter: display names, kind, range, default, step,
//! and the two stable identifiers (numeric [`ParamId`] for automation lanes,
//! `string_id` for saved state).
//!
//! # Example
//!
//! ```rust
//! use basicverb_core::{ParamDescriptor, ParamId, ParamKind};
//!
//! let size = ParamDescriptor::continuous("Room Size", "Size", 0.0, 1.0, 0.3, 0.01)
//!     .with_id(ParamId(1500), "r_size");
//!
//! assert_eq!(size.kind, ParamKind::Continuous);
//! assert_eq!(size.clamp(1.5), 1.0);
//! assert_eq!(size.format_value(0.3), "0.30");
//! ```
//!
//! # no_std Support
//!
//! Descriptors are `Copy` and hold only `&'static str`. Formatting needs
//! `alloc`.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Stable parameter identifier that survives reordering.
///
/// Maps directly to a host's automation id. Once assigned, a `ParamId` must
/// never change for a given parameter.
///
/// # Convention
///
/// Each effect gets a base ID and its parameters are sequential from there.
/// The reverb uses 1500..=1505.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// What sort of value a parameter holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Any value in `[min, max]`.
    Continuous,
    /// Stored as `0.0` (off) or `1.0` (on).
    Boolean,
}

impl ParamKind {
    /// Lowercase name for error messages and listings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Continuous => "continuous",
            ParamKind::Boolean => "boolean",
        }
    }
}

/// Parameter capability flags for plugin host communication.
///
/// # Example
///
/// ```rust
/// use basicverb_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps.
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// # Step Size
///
/// `step` is the recommended increment for knobs and encoders. Continuous
/// values are not snapped to it; boolean values always land on `0.0` or
/// `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Room Size").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Continuous or boolean.
    pub kind: ParamKind,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value on construction and after a reset.
    pub default: f32,

    /// Recommended increment for UI control.
    pub step: f32,

    /// Stable numeric ID for host automation.
    ///
    /// Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Stable string ID used as the key in saved state and presets.
    ///
    /// Default: `""` (unassigned).
    pub string_id: &'static str,

    /// Capability flags for plugin host communication.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous parameter with a custom range.
    pub const fn continuous(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            kind: ParamKind::Continuous,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// On/off parameter.
    pub const fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        Self {
            name,
            short_name,
            kind: ParamKind::Boolean,
            min: 0.0,
            max: 1.0,
            default: if default { 1.0 } else { 0.0 },
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Assign the stable identifiers.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamp a value into this parameter's legal set.
    ///
    /// Continuous values clamp to `[min, max]`. Boolean values become
    /// `1.0` at or above the midpoint and `0.0` below it. NaN maps to the
    /// default.
    ///
    /// ```rust
    /// use basicverb_core::ParamDescriptor;
    ///
    /// let freeze = ParamDescriptor::toggle("Freeze", "Freeze", false);
    /// assert_eq!(freeze.clamp(0.7), 1.0);
    /// assert_eq!(freeze.clamp(0.2), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        match self.kind {
            ParamKind::Continuous => value.clamp(self.min, self.max),
            ParamKind::Boolean => {
                if value >= 0.5 * (self.min + self.max) {
                    self.max
                } else {
                    self.min
                }
            }
        }
    }

    /// Whether a stored value reads as "on".
    #[inline]
    pub fn is_on(&self, value: f32) -> bool {
        value >= 0.5 * (self.min + self.max)
    }

    /// Convert a plain value to `[0.0, 1.0]`.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        ((value - self.min) / range).clamp(0.0, 1.0)
    }

    /// Convert a normalized value back to the parameter range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Format a value for host display.
    pub fn format_value(&self, value: f32) -> String {
        match self.kind {
            ParamKind::Continuous => format!("{:.2}", self.clamp(value)),
            ParamKind::Boolean => {
                if self.is_on(value) {
                    String::from("On")
                } else {
                    String::from("Off")
                }
            }
        }
    }

    /// Parse display text back to a clamped value.
    ///
    /// Boolean parameters accept `on`/`off`, `true`/`false`, `yes`/`no` and
    /// numbers. Returns `None` for unparseable text.
    pub fn parse_value(&self, text: &str) -> Option<f32> {
        let text = text.trim();
        if self.kind == ParamKind::Boolean {
            let on = ["on", "true", "yes"];
            let off = ["off", "false", "no"];
            if on.iter().any(|w| text.eq_ignore_ascii_case(w)) {
                return Some(self.max);
            }
            if off.iter().any(|w| text.eq_ignore_ascii_case(w)) {
                return Some(self.min);
            }
        }
        text.parse::<f32>().ok().map(|v| self.clamp(v))
    }
}
