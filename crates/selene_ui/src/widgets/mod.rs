//! Built-in widget set.
//!
//! Every widget is an [`crate::element::Element`] around an embedded
//! [`crate::element::ElementBase`]; anything here can parent anything
//! else. Decorative widgets (labels, gradients, images) do not block the
//! pointer; interactive ones do.

mod button;
mod draggable;
mod dropdown;
mod gradient;
mod image;
mod label;
mod panel;
mod progress;
mod scroll;
mod select;
mod slider;
mod switch;
mod textbox;

pub use button::Button;
pub use draggable::DraggablePanel;
pub use dropdown::Dropdown;
pub use gradient::GradientPanel;
pub use image::{ImageButton, ImageLabel};
pub use label::Label;
pub use panel::Panel;
pub use progress::ProgressBar;
pub use scroll::ScrollFrame;
pub use select::Select;
pub use slider::Slider;
pub use switch::Switch;
pub use textbox::TextBox;

/// Shortens a display string to `max` characters, ellipsized.
pub(crate) fn truncate_label(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::truncate_label;

    #[test]
    fn truncates_long_labels() {
        assert_eq!(truncate_label("short", 15), "short");
        assert_eq!(
            truncate_label("a very long option label", 15),
            "a very long ..."
        );
        assert_eq!(truncate_label("exactly fifteen", 15), "exactly fifteen");
    }
}
