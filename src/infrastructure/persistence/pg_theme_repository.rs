//! PostgreSQL implementation of theme repository.
//!
//! Theme options are stored as kebab-case strings. Unknown stored values
//! (from older releases or manual edits) fall back to the option default
//! instead of failing the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Theme, ThemeSettings};
use crate::domain::repositories::ThemeRepository;
use crate::error::AppError;

/// PostgreSQL repository for per-user themes.
pub struct PgThemeRepository {
    pool: Arc<PgPool>,
}

impl PgThemeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Raw row shape; option columns come back as strings.
#[derive(sqlx::FromRow)]
struct ThemeRow {
    id: i64,
    user_id: i64,
    font_family: String,
    font_size: String,
    font_weight: String,
    button_style: String,
    button_shadow: String,
    button_border: String,
    button_animation: String,
    profile_shape: String,
    profile_size: String,
    spacing: String,
    layout_width: String,
    gradient_enabled: bool,
    blur_enabled: bool,
    background_color: String,
    text_color: String,
    button_color: String,
    custom_css: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ThemeRow> for Theme {
    fn from(row: ThemeRow) -> Self {
        let settings = ThemeSettings {
            font_family: row.font_family.parse().unwrap_or_default(),
            font_size: row.font_size.parse().unwrap_or_default(),
            font_weight: row.font_weight.parse().unwrap_or_default(),
            button_style: row.button_style.parse().unwrap_or_default(),
            button_shadow: row.button_shadow.parse().unwrap_or_default(),
            button_border: row.button_border.parse().unwrap_or_default(),
            button_animation: row.button_animation.parse().unwrap_or_default(),
            profile_shape: row.profile_shape.parse().unwrap_or_default(),
            profile_size: row.profile_size.parse().unwrap_or_default(),
            spacing: row.spacing.parse().unwrap_or_default(),
            layout_width: row.layout_width.parse().unwrap_or_default(),
            gradient_enabled: row.gradient_enabled,
            blur_enabled: row.blur_enabled,
            background_color: row.background_color,
            text_color: row.text_color,
            button_color: row.button_color,
            custom_css: row.custom_css,
        };

        Theme {
            id: row.id,
            user_id: row.user_id,
            settings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ThemeRepository for PgThemeRepository {
    async fn find_by_user(&self, user_id: i64) -> Result<Option<Theme>, AppError> {
        let row = sqlx::query_as::<_, ThemeRow>("SELECT * FROM themes WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Theme::from))
    }

    async fn upsert(&self, user_id: i64, settings: ThemeSettings) -> Result<Theme, AppError> {
        let row = sqlx::query_as::<_, ThemeRow>(
            r#"
            INSERT INTO themes (
                user_id, font_family, font_size, font_weight,
                button_style, button_shadow, button_border, button_animation,
                profile_shape, profile_size, spacing, layout_width,
                gradient_enabled, blur_enabled,
                background_color, text_color, button_color, custom_css
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (user_id) DO UPDATE SET
                font_family      = EXCLUDED.font_family,
                font_size        = EXCLUDED.font_size,
                font_weight      = EXCLUDED.font_weight,
                button_style     = EXCLUDED.button_style,
                button_shadow    = EXCLUDED.button_shadow,
                button_border    = EXCLUDED.button_border,
                button_animation = EXCLUDED.button_animation,
                profile_shape    = EXCLUDED.profile_shape,
                profile_size     = EXCLUDED.profile_size,
                spacing          = EXCLUDED.spacing,
                layout_width     = EXCLUDED.layout_width,
                gradient_enabled = EXCLUDED.gradient_enabled,
                blur_enabled     = EXCLUDED.blur_enabled,
                background_color = EXCLUDED.background_color,
                text_color       = EXCLUDED.text_color,
                button_color     = EXCLUDED.button_color,
                custom_css       = EXCLUDED.custom_css,
                updated_at       = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(settings.font_family.to_string())
        .bind(settings.font_size.to_string())
        .bind(settings.font_weight.to_string())
        .bind(settings.button_style.to_string())
        .bind(settings.button_shadow.to_string())
        .bind(settings.button_border.to_string())
        .bind(settings.button_animation.to_string())
        .bind(settings.profile_shape.to_string())
        .bind(settings.profile_size.to_string())
        .bind(settings.spacing.to_string())
        .bind(settings.layout_width.to_string())
        .bind(settings.gradient_enabled)
        .bind(settings.blur_enabled)
        .bind(&settings.background_color)
        .bind(&settings.text_color)
        .bind(&settings.button_color)
        .bind(&settings.custom_css)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Theme::from(row))
    }
}
