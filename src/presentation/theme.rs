use crate::domain::models::{MessageSeverity, SyncPhase};
use eframe::egui;

/// Flat, high-contrast colours used across the window
pub struct Palette {
    pub bg: egui::Color32,
    pub fg: egui::Color32,
    pub stroke: egui::Color32,
    pub accent: egui::Color32,
    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,
    pub info: egui::Color32,
}

impl Palette {
    pub fn new(is_dark: bool) -> Self {
        if is_dark {
            Self {
                bg: egui::Color32::from_rgb(25, 25, 25),
                fg: egui::Color32::WHITE,
                stroke: egui::Color32::WHITE,
                accent: egui::Color32::from_rgb(255, 200, 0),
                success: egui::Color32::from_rgb(0, 255, 127),
                warning: egui::Color32::from_rgb(255, 200, 0),
                error: egui::Color32::from_rgb(255, 80, 80),
                info: egui::Color32::from_rgb(0, 255, 255),
            }
        } else {
            Self {
                bg: egui::Color32::from_rgb(245, 245, 245),
                fg: egui::Color32::BLACK,
                stroke: egui::Color32::BLACK,
                accent: egui::Color32::from_rgb(255, 220, 0),
                success: egui::Color32::from_rgb(0, 150, 0),
                warning: egui::Color32::from_rgb(200, 150, 0),
                error: egui::Color32::from_rgb(220, 30, 30),
                info: egui::Color32::from_rgb(50, 50, 255),
            }
        }
    }

    pub fn severity(&self, severity: MessageSeverity) -> egui::Color32 {
        match severity {
            MessageSeverity::Info => self.info,
            MessageSeverity::Success => self.success,
            MessageSeverity::Warning => self.warning,
            MessageSeverity::Error => self.error,
        }
    }

    /// Banner background and text colour for a phase
    pub fn phase(&self, phase: SyncPhase) -> (egui::Color32, egui::Color32) {
        match phase {
            SyncPhase::Done => (egui::Color32::from_rgb(0, 200, 0), egui::Color32::BLACK),
            SyncPhase::NotFound => (self.warning, egui::Color32::BLACK),
            SyncPhase::Aborted => (egui::Color32::from_rgb(255, 50, 50), egui::Color32::WHITE),
            SyncPhase::Idle => (egui::Color32::from_gray(100), egui::Color32::WHITE),
            _ => (self.accent, egui::Color32::BLACK),
        }
    }
}

pub fn apply_theme(ctx: &egui::Context, is_dark: bool) {
    let mut style = (*ctx.style()).clone();
    let palette = Palette::new(is_dark);

    style
        .text_styles
        .iter_mut()
        .for_each(|(text_style, font_id)| {
            font_id.size = match text_style {
                egui::TextStyle::Heading => 26.0,
                egui::TextStyle::Body | egui::TextStyle::Button => 15.0,
                _ => font_id.size,
            };
        });

    style.spacing.item_spacing = egui::vec2(12.0, 12.0);
    style.spacing.button_padding = egui::vec2(16.0, 10.0);

    let widgets = &mut style.visuals.widgets;
    for (visuals, width) in [
        (&mut widgets.noninteractive, 2.0_f32),
        (&mut widgets.inactive, 2.0),
        (&mut widgets.hovered, 2.5),
        (&mut widgets.active, 3.0),
    ] {
        visuals.bg_stroke = egui::Stroke::new(width, palette.stroke);
        visuals.rounding = egui::Rounding::ZERO;
        visuals.fg_stroke = egui::Stroke::new(1.0, palette.fg);
    }
    widgets.noninteractive.bg_fill = palette.bg;
    widgets.inactive.bg_fill = if is_dark {
        egui::Color32::from_gray(30)
    } else {
        egui::Color32::WHITE
    };
    widgets.hovered.bg_fill = palette.accent;
    widgets.hovered.fg_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
    widgets.active.bg_fill = palette.success;
    widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);

    style.visuals.window_rounding = egui::Rounding::ZERO;
    style.visuals.window_stroke = egui::Stroke::new(2.0, palette.stroke);
    style.visuals.window_fill = palette.bg;
    style.visuals.panel_fill = palette.bg;
    style.visuals.override_text_color = Some(palette.fg);

    ctx.set_style(style);
}
