use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        if visuals.dark_mode { ThemeMode::Dark } else { ThemeMode::Light }
    }
}

pub struct ColorPalette;

impl ColorPalette {
    pub const BLUE_400: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
    pub const BLUE_500: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
    pub const BLUE_600: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);

    pub const SLATE_100: egui::Color32 = egui::Color32::from_rgb(241, 245, 249);
    pub const SLATE_200: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
    pub const SLATE_300: egui::Color32 = egui::Color32::from_rgb(203, 213, 225);

    pub const GRAY_50: egui::Color32 = egui::Color32::from_rgb(249, 250, 251);
    pub const GRAY_100: egui::Color32 = egui::Color32::from_rgb(243, 244, 246);
    pub const GRAY_200: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);
    pub const GRAY_300: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);
    pub const GRAY_400: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);
    pub const GRAY_500: egui::Color32 = egui::Color32::from_rgb(107, 114, 128);
    pub const GRAY_700: egui::Color32 = egui::Color32::from_rgb(55, 65, 81);
    pub const GRAY_800: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
    pub const GRAY_900: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);

    pub const ZINC_100: egui::Color32 = egui::Color32::from_rgb(244, 244, 245);
    pub const ZINC_200: egui::Color32 = egui::Color32::from_rgb(228, 228, 231);
    pub const ZINC_400: egui::Color32 = egui::Color32::from_rgb(161, 161, 170);
    pub const ZINC_500: egui::Color32 = egui::Color32::from_rgb(113, 113, 122);
    pub const ZINC_600: egui::Color32 = egui::Color32::from_rgb(82, 82, 91);
    pub const ZINC_700: egui::Color32 = egui::Color32::from_rgb(63, 63, 70);
    pub const ZINC_800: egui::Color32 = egui::Color32::from_rgb(39, 39, 42);
    pub const ZINC_900: egui::Color32 = egui::Color32::from_rgb(24, 24, 27);

    pub const RED_600: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
}

/// Surface colours for one theme. Fields run from the panel background down
/// to the pressed-widget state.
struct ThemeColors {
    panel: egui::Color32,
    faint: egui::Color32,
    extreme: egui::Color32,
    fills: [(egui::Color32, egui::Color32, egui::Color32); 4],
    text: [egui::Color32; 4],
    selection: (egui::Color32, egui::Color32),
    link: egui::Color32,
}

const DARK: ThemeColors = ThemeColors {
    panel: ColorPalette::ZINC_900,
    faint: ColorPalette::ZINC_800,
    extreme: egui::Color32::from_rgb(12, 12, 15),
    fills: [
        (ColorPalette::ZINC_800, egui::Color32::from_rgb(22, 22, 26), ColorPalette::ZINC_700),
        (egui::Color32::from_rgb(30, 30, 35), ColorPalette::ZINC_800, ColorPalette::ZINC_600),
        (egui::Color32::from_rgb(40, 40, 48), egui::Color32::from_rgb(35, 35, 42), ColorPalette::ZINC_500),
        (egui::Color32::from_rgb(50, 50, 60), egui::Color32::from_rgb(45, 45, 55), ColorPalette::ZINC_400),
    ],
    text: [ColorPalette::SLATE_300, ColorPalette::SLATE_200, ColorPalette::SLATE_100, egui::Color32::WHITE],
    selection: (egui::Color32::from_rgba_premultiplied(60, 120, 240, 100), egui::Color32::BLACK),
    link: ColorPalette::BLUE_400,
};

const LIGHT: ThemeColors = ThemeColors {
    panel: ColorPalette::GRAY_50,
    faint: ColorPalette::GRAY_100,
    extreme: egui::Color32::WHITE,
    fills: [
        (egui::Color32::WHITE, ColorPalette::GRAY_50, ColorPalette::GRAY_300),
        (ColorPalette::GRAY_50, ColorPalette::GRAY_100, ColorPalette::GRAY_300),
        (ColorPalette::GRAY_100, ColorPalette::GRAY_200, ColorPalette::GRAY_400),
        (ColorPalette::GRAY_200, ColorPalette::GRAY_300, ColorPalette::GRAY_500),
    ],
    text: [ColorPalette::GRAY_700, ColorPalette::GRAY_800, ColorPalette::GRAY_900, egui::Color32::BLACK],
    selection: (egui::Color32::from_rgba_premultiplied(60, 120, 240, 80), ColorPalette::BLUE_600),
    link: ColorPalette::BLUE_600,
};

pub fn apply_theme(ctx: &egui::Context, theme: ThemeMode) {
    let mut style: egui::Style = (*ctx.style()).clone();
    let colors: &ThemeColors = match theme { ThemeMode::Dark => &DARK, ThemeMode::Light => &LIGHT };

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(10);

    let v: &mut egui::Visuals = &mut style.visuals;
    v.dark_mode = theme == ThemeMode::Dark;
    v.panel_fill = colors.panel;
    v.window_fill = colors.panel;
    v.faint_bg_color = colors.faint;
    v.extreme_bg_color = colors.extreme;

    let widgets: [&mut egui::style::WidgetVisuals; 4] = [
        &mut v.widgets.noninteractive, &mut v.widgets.inactive, &mut v.widgets.hovered, &mut v.widgets.active,
    ];
    for (i, w) in widgets.into_iter().enumerate() {
        let (bg, weak, stroke) = colors.fills[i];
        w.corner_radius = egui::CornerRadius::same(4);
        w.bg_fill = bg;
        w.weak_bg_fill = weak;
        w.bg_stroke = egui::Stroke::new(1.0, stroke);
        w.fg_stroke = egui::Stroke::new(1.0, colors.text[i]);
    }

    v.selection.bg_fill = colors.selection.0;
    v.selection.stroke = egui::Stroke::new(1.0, colors.selection.1);
    v.hyperlink_color = colors.link;

    ctx.set_style(style);
}

/// Compact toolbar button; `active` paints it in the accent colour.
pub fn toolbar_button(ui: &mut egui::Ui, text: &str, theme: ThemeMode, active: bool, enabled: bool) -> egui::Response {
    let (bg, hover, txt) = if active {
        (ColorPalette::BLUE_600, ColorPalette::BLUE_500, egui::Color32::WHITE)
    } else if theme == ThemeMode::Dark {
        (ColorPalette::ZINC_700, ColorPalette::ZINC_600, ColorPalette::ZINC_200)
    } else {
        (ColorPalette::GRAY_200, ColorPalette::GRAY_300, ColorPalette::GRAY_800)
    };

    ui.scope(|ui: &mut egui::Ui| {
        let s: &mut egui::Style = ui.style_mut();
        s.visuals.widgets.inactive.weak_bg_fill = bg;
        s.visuals.widgets.inactive.bg_stroke = egui::Stroke::NONE;
        s.visuals.widgets.hovered.weak_bg_fill = hover;
        s.visuals.widgets.hovered.bg_stroke = egui::Stroke::NONE;
        s.visuals.widgets.active.weak_bg_fill = hover;
        let button: egui::Button<'_> = egui::Button::new(egui::RichText::new(text).size(12.0).color(txt))
            .min_size(egui::vec2(0.0, 24.0));
        ui.add_enabled(enabled, button)
    }).inner
}

pub fn primary_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    ui.scope(|ui: &mut egui::Ui| {
        let s: &mut egui::Style = ui.style_mut();
        for (w, fill) in [
            (&mut s.visuals.widgets.inactive, ColorPalette::BLUE_600),
            (&mut s.visuals.widgets.hovered, ColorPalette::BLUE_500),
            (&mut s.visuals.widgets.active, ColorPalette::BLUE_600),
        ] {
            w.bg_fill = fill;
            w.weak_bg_fill = fill;
            w.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
            w.bg_stroke = egui::Stroke::NONE;
        }
        ui.add_enabled(enabled, egui::Button::new(egui::RichText::new(text).size(13.0)).min_size(egui::vec2(72.0, 26.0)))
    }).inner
}

pub fn secondary_button(ui: &mut egui::Ui, text: &str, theme: ThemeMode) -> egui::Response {
    let (bg, stroke, txt, hover) = match theme {
        ThemeMode::Dark => (ColorPalette::ZINC_800, ColorPalette::ZINC_600, ColorPalette::SLATE_200, ColorPalette::ZINC_700),
        ThemeMode::Light => (egui::Color32::WHITE, ColorPalette::GRAY_300, ColorPalette::GRAY_800, ColorPalette::GRAY_50),
    };
    ui.scope(|ui: &mut egui::Ui| {
        let s: &mut egui::Style = ui.style_mut();
        for (w, fill) in [
            (&mut s.visuals.widgets.inactive, bg),
            (&mut s.visuals.widgets.hovered, hover),
            (&mut s.visuals.widgets.active, bg),
        ] {
            w.bg_fill = fill;
            w.weak_bg_fill = fill;
            w.fg_stroke = egui::Stroke::new(1.0, txt);
            w.bg_stroke = egui::Stroke::new(1.0, stroke);
        }
        ui.add(egui::Button::new(egui::RichText::new(text).size(13.0)).min_size(egui::vec2(72.0, 26.0)))
    }).inner
}
