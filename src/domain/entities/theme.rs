//! Theme entity: per-user profile styling with enumerated option sets.
//!
//! Every option round-trips as a kebab-case string, both on the wire and
//! in the database. Unknown stored values fall back to the option default
//! instead of failing the row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

macro_rules! theme_option {
    ($(#[$meta:meta])* $name:ident { $default:ident, $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Default,
            Display, EnumString, Serialize, Deserialize,
        )]
        #[strum(serialize_all = "kebab-case")]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            #[default]
            $default,
            $($variant,)*
        }
    };
}

theme_option!(FontFamily { Sans, Serif, Mono });
theme_option!(FontSize { Medium, Small, Large });
theme_option!(FontWeight { Regular, Light, Bold });
theme_option!(ButtonStyle { Solid, Outline, SoftShadow, HardShadow });
theme_option!(ButtonShadow { None, Soft, Hard });
theme_option!(ButtonBorder { None, Thin, Thick });
theme_option!(ButtonAnimation { None, Grow, Shake, Pulse });
theme_option!(ProfileShape { Circle, Square, Rounded });
theme_option!(ProfileSize { Medium, Small, Large });
theme_option!(Spacing { Normal, Compact, Relaxed });
theme_option!(LayoutWidth { Normal, Narrow, Wide });

/// The full set of styling options. Doubles as the wire shape for
/// `GET/PUT /api/theme`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ThemeSettings {
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub font_weight: FontWeight,
    pub button_style: ButtonStyle,
    pub button_shadow: ButtonShadow,
    pub button_border: ButtonBorder,
    pub button_animation: ButtonAnimation,
    pub profile_shape: ProfileShape,
    pub profile_size: ProfileSize,
    pub spacing: Spacing,
    pub layout_width: LayoutWidth,
    pub gradient_enabled: bool,
    pub blur_enabled: bool,
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
    /// Free-form CSS appended after the generated styles.
    #[validate(length(max = 5000, message = "custom CSS is capped at 5000 characters"))]
    pub custom_css: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: FontSize::default(),
            font_weight: FontWeight::default(),
            button_style: ButtonStyle::default(),
            button_shadow: ButtonShadow::default(),
            button_border: ButtonBorder::default(),
            button_animation: ButtonAnimation::default(),
            profile_shape: ProfileShape::default(),
            profile_size: ProfileSize::default(),
            spacing: Spacing::default(),
            layout_width: LayoutWidth::default(),
            gradient_enabled: false,
            blur_enabled: false,
            background_color: "#ffffff".to_string(),
            text_color: "#111111".to_string(),
            button_color: "#111111".to_string(),
            custom_css: String::new(),
        }
    }
}

/// A stored theme. One per user.
#[derive(Debug, Clone)]
pub struct Theme {
    pub id: i64,
    pub user_id: i64,
    pub settings: ThemeSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
