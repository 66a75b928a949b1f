//! egui renderer for the noodle lab window.

use eframe::egui::{self, Align, Layout, RichText, Ui, Vec2};

use crate::egui_app::controller::LabController;
use crate::egui_app::style;
use crate::recipe_lab::Category;

/// Smallest window that still fits the pickers beside the saved list.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(880.0, 560.0);

/// User intents gathered while drawing, applied once the frame is laid out.
#[derive(Debug, Clone, PartialEq)]
enum UiAction {
    Select(Category, String),
    Randomize,
    Save,
    CopySteps,
    CopyJson,
    ExportJson,
    Remove(i64),
    ClearSaved,
    ToggleTheme,
}

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: LabController,
    applied_dark_mode: Option<bool>,
}

impl EguiApp {
    /// Create the app, loading settings and saved recipes.
    pub fn new() -> Result<Self, String> {
        let controller =
            LabController::new().map_err(|err| format!("Failed to load recipe lab: {err}"))?;
        Ok(Self {
            controller,
            applied_dark_mode: None,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        let dark = self.controller.ui.dark_mode;
        if self.applied_dark_mode != Some(dark) {
            ctx.set_visuals(style::visuals(dark));
            self.applied_dark_mode = Some(dark);
        }
    }

    fn render_top_bar(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Maggilicious");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                    let theme = if self.controller.ui.dark_mode { "Light" } else { "Dark" };
                    if ui.button(theme).clicked() {
                        actions.push(UiAction::ToggleTheme);
                    }
                });
            });
        });
    }

    fn render_status(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status = &self.controller.ui.status;
            ui.horizontal(|ui| {
                ui.add_space(8.0);
                ui.painter().circle_filled(
                    ui.cursor().min + egui::vec2(9.0, 11.0),
                    9.0,
                    status.badge_color,
                );
                ui.add_space(24.0);
                ui.label(&status.badge_label);
                ui.separator();
                ui.label(&status.text);
            });
        });
    }

    fn render_saved_panel(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let palette = style::palette(self.controller.ui.dark_mode);
        let rows = &self.controller.ui.saved_rows;
        egui::SidePanel::right("saved_panel")
            .min_width(300.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Saved Creations").strong());
                    ui.label(RichText::new("local only").small().color(palette.text_muted));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui
                            .add_enabled(!rows.is_empty(), egui::Button::new("Clear all"))
                            .clicked()
                        {
                            actions.push(UiAction::ClearSaved);
                        }
                    });
                });
                ui.add_space(6.0);
                if rows.is_empty() {
                    ui.label(
                        RichText::new("No saved bowls yet. Hit Surprise me then Save!")
                            .color(palette.text_muted),
                    );
                    return;
                }
                egui::ScrollArea::vertical()
                    .id_salt("saved_scroll")
                    .show(ui, |ui| {
                        for row in rows {
                            ui.push_id(row.created_at, |ui| {
                                egui::Frame::group(ui.style()).show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.horizontal(|ui| {
                                        ui.label(RichText::new(&row.title).strong());
                                        ui.with_layout(
                                            Layout::right_to_left(Align::Center),
                                            |ui| {
                                                if ui.small_button("✖").clicked() {
                                                    actions.push(UiAction::Remove(row.created_at));
                                                }
                                            },
                                        );
                                    });
                                    ui.label(
                                        RichText::new(&row.saved_at)
                                            .small()
                                            .color(palette.text_muted),
                                    );
                                    if !row.extras.is_empty() {
                                        ui.label(format!("Mix-ins: {}", row.extras));
                                    }
                                });
                            });
                            ui.add_space(4.0);
                        }
                    });
            });
    }

    fn render_lab(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let heading = self.controller.lab_heading();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("lab_scroll")
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(heading).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.button("Save").clicked() {
                                actions.push(UiAction::Save);
                            }
                            if ui.button("Surprise me").clicked() {
                                actions.push(UiAction::Randomize);
                            }
                        });
                    });
                    ui.add_space(8.0);
                    self.render_pickers(ui, actions);
                    ui.add_space(12.0);
                    ui.separator();
                    self.render_recipe_card(ui, actions);
                });
        });
    }

    fn render_pickers(&self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        let composer = self.controller.composer();
        let selection = composer.selection();
        for def in &composer.catalog().categories {
            ui.label(RichText::new(&def.label).strong());
            ui.horizontal_wrapped(|ui| {
                for option in &def.options {
                    let selected = selection.contains(def.category, option);
                    let clicked = if def.multi {
                        let mut checked = selected;
                        ui.checkbox(&mut checked, option.as_str()).changed()
                    } else {
                        ui.selectable_label(selected, option.as_str()).clicked() && !selected
                    };
                    if clicked {
                        actions.push(UiAction::Select(def.category, option.clone()));
                    }
                }
            });
            ui.add_space(6.0);
        }
    }

    fn render_recipe_card(&self, ui: &mut Ui, actions: &mut Vec<UiAction>) {
        let palette = style::palette(self.controller.ui.dark_mode);
        let recipe = self.controller.composer().recipe();
        ui.heading(&recipe.title);
        ui.add_space(4.0);
        for (index, step) in recipe.steps.iter().enumerate() {
            ui.label(format!("{}. {step}", index + 1));
        }
        ui.add_space(6.0);
        ui.label(RichText::new(&recipe.mood).color(palette.accent_amber));
        ui.label(
            RichText::new(format!(
                "~{} kcal • protein ~{}g",
                recipe.nutrition.energy_kcal, recipe.nutrition.protein_g
            ))
            .small()
            .color(palette.text_muted),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Copy steps").clicked() {
                actions.push(UiAction::CopySteps);
            }
            if ui.button("Copy JSON").clicked() {
                actions.push(UiAction::CopyJson);
            }
            if ui.button("Export JSON").clicked() {
                actions.push(UiAction::ExportJson);
            }
        });
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Select(category, label) => self.controller.select(category, &label),
            UiAction::Randomize => self.controller.randomize(),
            UiAction::Save => self.controller.save_current(),
            UiAction::CopySteps => self.controller.copy_steps(),
            UiAction::CopyJson => self.controller.copy_json(),
            UiAction::ExportJson => self.controller.export_json_via_dialog(),
            UiAction::Remove(created_at) => self.controller.remove_saved(created_at),
            UiAction::ClearSaved => self.controller.clear_saved(),
            UiAction::ToggleTheme => self.controller.toggle_dark_mode(),
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let mut actions = Vec::new();
        self.render_top_bar(ctx, &mut actions);
        self.render_status(ctx);
        self.render_saved_panel(ctx, &mut actions);
        self.render_lab(ctx, &mut actions);
        for action in actions {
            self.apply(action);
        }
        if let Some(text) = self.controller.take_clipboard_text() {
            ctx.copy_text(text);
        }
    }
}
