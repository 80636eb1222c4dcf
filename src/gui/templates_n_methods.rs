use std::path::Path;

use iced::alignment::{Horizontal, Vertical};
use iced::border::Radius;
use iced::widget::{button, container, text, tooltip, Button, Container, Tooltip};
use iced::{Background, Border, Color, Length, Renderer, Shadow, Theme};

pub const BG_MAIN: Color = Color::from_rgba(83.0 / 255.0, 203.0 / 255.0, 227.0 / 255.0, 1.0);
pub const BG_SEC: Color = Color::from_rgba(44.0 / 255.0, 194.0 / 255.0, 218.0 / 255.0, 1.0);
pub const BG_TRI: Color = Color::from_rgba(38.0 / 255.0, 170.0 / 255.0, 191.0 / 255.0, 1.0);
pub const BG_QUAD: Color = Color::from_rgba(28.0 / 255.0, 118.0 / 255.0, 133.0 / 255.0, 1.0);
pub const BG_CARD: Color = Color::from_rgba(36.0 / 255.0, 40.0 / 255.0, 59.0 / 255.0, 1.0);

pub const TEXT_OK: Color = Color::from_rgba(120.0 / 255.0, 220.0 / 255.0, 140.0 / 255.0, 1.0);
pub const TEXT_ERR: Color = Color::from_rgba(240.0 / 255.0, 110.0 / 255.0, 110.0 / 255.0, 1.0);
pub const TEXT_DIM: Color = Color::from_rgba(170.0 / 255.0, 170.0 / 255.0, 170.0 / 255.0, 1.0);

const RAD_MAIN: f32 = 2.0;
const RAD_SEC: f32 = 1.0;

pub fn path_to_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn padding_inner<'a, Exec>(width: impl Into<Length>) -> Container<'a, Exec, Theme, Renderer> {
    container("").width(width)
}

pub fn btn_style_base() -> impl Fn(&Theme, button::Status) -> button::Style {
    |_, status: button::Status| button::Style {
        background: match status {
            button::Status::Active => Some(Background::Color(BG_MAIN)),
            button::Status::Hovered => Some(Background::Color(BG_SEC)),
            button::Status::Pressed => Some(Background::Color(BG_TRI)),
            button::Status::Disabled => Some(Background::Color(BG_QUAD)),
        },
        text_color: match status {
            button::Status::Active => Color::BLACK,
            button::Status::Hovered => Color::WHITE,
            button::Status::Pressed => Color::WHITE,
            button::Status::Disabled => TEXT_DIM,
        },
        border: match status {
            button::Status::Active => Border { color: BG_SEC, width: 1.0, radius: Radius::from(RAD_MAIN) },
            button::Status::Hovered => Border { color: BG_TRI, width: 1.0, radius: Radius::from(RAD_SEC) },
            button::Status::Pressed => Border { color: BG_QUAD, width: 1.0, radius: Radius::from(RAD_SEC) },
            button::Status::Disabled => Border { color: Color::BLACK, width: 0.0, radius: Radius::from(RAD_SEC) },
        },
        shadow: Shadow::default(),
    }
}

/// Row header inside the product list, flat until hovered.
pub fn btn_style_header() -> impl Fn(&Theme, button::Status) -> button::Style {
    |_, status: button::Status| button::Style {
        background: match status {
            button::Status::Hovered | button::Status::Pressed => Some(Background::Color(BG_QUAD)),
            _ => None,
        },
        text_color: Color::WHITE,
        border: Border { color: Color::TRANSPARENT, width: 0.0, radius: Radius::from(RAD_SEC) },
        shadow: Shadow::default(),
    }
}

/// `None` renders the button disabled.
pub fn btn_base<'a, Exec, D>(
    txt: impl Into<String>,
    width: Option<D>,
    height: Option<D>,
    exec: Option<Exec>,
) -> Button<'a, Exec>
where
    D: Into<Length>,
    Exec: Clone + 'a,
{
    let mut btn = button(text(txt.into()).align_x(Horizontal::Center).align_y(Vertical::Center))
        .on_press_maybe(exec);

    btn = if let Some(w) = width { btn.width(w) } else { btn };
    btn = if let Some(h) = height { btn.height(h) } else { btn };
    btn.style(btn_style_base())
}

pub fn card_style() -> impl Fn(&Theme) -> container::Style {
    |_| container::Style {
        text_color: Some(Color::WHITE),
        background: Some(Background::Color(BG_CARD)),
        border: Border { color: BG_QUAD, width: 1.0, radius: Radius::from(RAD_MAIN) },
        shadow: Shadow::default(),
    }
}

pub fn tooltip_default<'a, Exec>(content: impl Into<String>, width: impl Into<Length>) -> Tooltip<'a, Exec, Theme, Renderer>
where
    Exec: 'a,
{
    tooltip(
        container(text("?").size(14))
            .center(20)
            .style(|_| container::Style {
                text_color: Some(Color::WHITE),
                background: Some(Background::Color(Color::BLACK)),
                border: Border { color: BG_SEC, width: 1.0, radius: Radius::from(RAD_SEC) },
                shadow: Shadow::default(),
            }),
        container(text(content.into()).size(15))
            .padding(10)
            .width(width)
            .style(|_| container::Style {
                text_color: Some(Color::WHITE),
                background: Some(Background::Color(Color::BLACK)),
                border: Border { color: BG_MAIN, width: 1.0, radius: Radius::from(RAD_MAIN) },
                shadow: Shadow::default(),
            }),
        tooltip::Position::FollowCursor,
    )
}
