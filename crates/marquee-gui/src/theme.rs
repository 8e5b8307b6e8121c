//! Color schemes and style functions.
//!
//! Two built-in variants (dark and light) with a warm amber accent; the
//! active one is picked from the OS appearance at startup. Each style
//! function returns a closure suitable for Iced's `.style()` method,
//! capturing the needed color tokens from a `ColorScheme`.

use iced::overlay::menu;
use iced::widget::{button, container, pick_list, scrollable};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::style;

/// Resolved appearance variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

/// Pick the variant matching the OS appearance, defaulting to dark.
pub fn detect_mode() -> ThemeMode {
    match dark_light::detect() {
        Ok(dark_light::Mode::Light) => ThemeMode::Light,
        _ => ThemeMode::Dark,
    }
}

/// Semantic color tokens for the application.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Surfaces (low -> high elevation)
    pub surface: Color,
    pub surface_container_low: Color,
    pub surface_container: Color,
    pub surface_container_high: Color,
    pub surface_bright: Color,

    // Text hierarchy
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,

    // Accent (warm amber)
    pub primary: Color,
    pub on_primary: Color,

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl ColorScheme {
    pub fn dark() -> Self {
        Self {
            surface: Color::from_rgb8(0x16, 0x17, 0x1B),
            surface_container_low: Color::from_rgb8(0x1C, 0x1D, 0x22),
            surface_container: Color::from_rgb8(0x22, 0x23, 0x29),
            surface_container_high: Color::from_rgb8(0x2A, 0x2B, 0x32),
            surface_bright: Color::from_rgb8(0x34, 0x35, 0x3D),
            on_surface: Color::from_rgb8(0xE4, 0xE2, 0xE6),
            on_surface_variant: Color::from_rgb8(0xA8, 0xA6, 0xAD),
            outline: Color::from_rgb8(0x7A, 0x78, 0x7F),
            outline_variant: Color::from_rgb8(0x3A, 0x3B, 0x42),
            primary: Color::from_rgb8(0xF2, 0xB8, 0x4B),
            on_primary: Color::from_rgb8(0x24, 0x1A, 0x00),
            success: Color::from_rgb8(0x7B, 0xC6, 0x7E),
            warning: Color::from_rgb8(0xE8, 0xC2, 0x66),
            error: Color::from_rgb8(0xE5, 0x73, 0x73),
        }
    }

    pub fn light() -> Self {
        Self {
            surface: Color::from_rgb8(0xFA, 0xF9, 0xFC),
            surface_container_low: Color::from_rgb8(0xF1, 0xEF, 0xF4),
            surface_container: Color::from_rgb8(0xE9, 0xE7, 0xEC),
            surface_container_high: Color::from_rgb8(0xDF, 0xDD, 0xE3),
            surface_bright: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            on_surface: Color::from_rgb8(0x1B, 0x1B, 0x1F),
            on_surface_variant: Color::from_rgb8(0x47, 0x46, 0x4C),
            outline: Color::from_rgb8(0x77, 0x76, 0x7C),
            outline_variant: Color::from_rgb8(0xC8, 0xC6, 0xCD),
            primary: Color::from_rgb8(0x9A, 0x6A, 0x00),
            on_primary: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            success: Color::from_rgb8(0x2E, 0x7D, 0x32),
            warning: Color::from_rgb8(0xB2, 0x6A, 0x00),
            error: Color::from_rgb8(0xBA, 0x1A, 0x1A),
        }
    }
}

/// Both appearance variants, resolved per mode.
#[derive(Debug, Clone)]
pub struct MarqueeTheme {
    pub dark: ColorScheme,
    pub light: ColorScheme,
}

impl MarqueeTheme {
    pub fn new() -> Self {
        Self {
            dark: ColorScheme::dark(),
            light: ColorScheme::light(),
        }
    }

    pub fn colors(&self, mode: ThemeMode) -> &ColorScheme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

fn scale_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

// ── Containers ───────────────────────────────────────────────────

/// Whole-window page background.
pub fn page_background(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface;
    let text = cs.on_surface;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

/// Top navigation bar.
pub fn top_bar(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_low;
    let text = cs.on_surface;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

/// A card container: surface background, rounded corners, subtle border.
pub fn card(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        ..Default::default()
    }
}

/// A notification card. Fading notices render at reduced opacity so the
/// exit transition is visible rather than an abrupt disappearance.
pub fn toast_card(cs: &ColorScheme, fading: bool) -> impl Fn(&Theme) -> container::Style {
    let alpha = if fading { 0.35 } else { 1.0 };
    let bg = scale_alpha(cs.surface_container_high, alpha);
    let border_color = scale_alpha(cs.outline_variant, alpha);
    let text = scale_alpha(cs.on_surface, alpha);
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        ..Default::default()
    }
}

/// Placeholder tile standing in for poster art, which is never fetched.
pub fn poster_placeholder(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let text = cs.outline;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: style::RADIUS_MD.into(),
        },
        ..Default::default()
    }
}

/// Movie card body.
pub fn movie_card_style(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_low;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_MD.into(),
        },
        ..Default::default()
    }
}

// ── Buttons ──────────────────────────────────────────────────────

/// Outlined button with transparent body and subtle hover.
pub fn ghost_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;
    let outline_variant = cs.outline_variant;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (Some(Background::Color(surface_bright)), on_surface),
            _ => (None, on_surface_variant),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                color: outline_variant,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
            ..Default::default()
        }
    }
}

/// Transparent icon button — no border, subtle hover.
pub fn icon_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => Some(Background::Color(surface_bright)),
            _ => None,
        };
        button::Style {
            background: bg,
            text_color: Color::TRANSPARENT,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: style::RADIUS_FULL.into(),
            },
            ..Default::default()
        }
    }
}

/// Inline accent-colored link.
pub fn link_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let text_color = match status {
            button::Status::Hovered => on_surface,
            _ => primary,
        };
        button::Style {
            background: None,
            text_color,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: style::RADIUS_SM.into(),
            },
            ..Default::default()
        }
    }
}

/// Clickable wrapper around a movie card.
pub fn card_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => Some(Background::Color(surface_bright)),
            _ => None,
        };
        button::Style {
            background: bg,
            text_color: on_surface,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: style::RADIUS_MD.into(),
            },
            ..Default::default()
        }
    }
}

// ── Pick lists ───────────────────────────────────────────────────

pub fn pick_list_style(cs: &ColorScheme) -> impl Fn(&Theme, pick_list::Status) -> pick_list::Style {
    let primary = cs.primary;
    let outline = cs.outline;
    let outline_variant = cs.outline_variant;
    let surface_container_low = cs.surface_container_low;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;

    move |_theme, status| {
        let (border_color, handle_color) = match status {
            pick_list::Status::Opened { .. } => (primary, primary),
            pick_list::Status::Hovered => (outline, on_surface),
            _ => (outline_variant, on_surface_variant),
        };
        pick_list::Style {
            text_color: on_surface,
            placeholder_color: on_surface_variant,
            handle_color,
            background: Background::Color(surface_container_low),
            border: Border {
                color: border_color,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
        }
    }
}

/// Pick list dropdown menu: themed background with accent selection.
pub fn pick_list_menu_style(cs: &ColorScheme) -> impl Fn(&Theme) -> menu::Style {
    let surface_container = cs.surface_container;
    let outline_variant = cs.outline_variant;
    let on_surface = cs.on_surface;
    let primary = cs.primary;
    let on_primary = cs.on_primary;

    move |_theme| menu::Style {
        background: Background::Color(surface_container),
        border: Border {
            color: outline_variant,
            width: 1.0,
            radius: style::RADIUS_MD.into(),
        },
        text_color: on_surface,
        selected_text_color: on_primary,
        selected_background: Background::Color(primary),
        shadow: Shadow {
            color: Color {
                a: 0.2,
                ..Color::BLACK
            },
            offset: Vector::new(0.0, 4.0),
            blur_radius: 12.0,
        },
    }
}

// ── Scrollbars ───────────────────────────────────────────────────

/// Minimal overlay scrollbar that stays out of the way until hovered.
pub fn overlay_scrollbar(
    cs: &ColorScheme,
) -> impl Fn(&Theme, scrollable::Status) -> scrollable::Style {
    let on_surface = cs.on_surface;
    let primary = cs.primary;

    move |_theme, status| {
        let (scroller_color, scroller_alpha) = match status {
            scrollable::Status::Dragged { .. } => (primary, 0.7),
            scrollable::Status::Hovered { .. } => (on_surface, 0.4),
            _ => (on_surface, 0.15),
        };

        let rail = scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: Background::Color(Color {
                    a: scroller_alpha,
                    ..scroller_color
                }),
                border: Border {
                    radius: style::RADIUS_FULL.into(),
                    ..Border::default()
                },
            },
        };

        scrollable::Style {
            container: container::Style::default(),
            vertical_rail: rail,
            horizontal_rail: rail,
            gap: None,
            auto_scroll: scrollable::AutoScroll {
                background: Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                shadow: Shadow::default(),
                icon: on_surface,
            },
        }
    }
}
