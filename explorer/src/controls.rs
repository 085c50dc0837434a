use egui::{CollapsingHeader, Color32, RichText, ScrollArea, TextEdit, Ui};

use crate::{
    controller::{Action, Controller},
    filter::Chip,
    model::{BiomarkerStatus, DrugStatus, Druggability},
    style,
    ui_consts::{COUNT_TEXT_SIZE, HEADING_TEXT_SIZE, META_TEXT_SIZE, SECTION_SPACING},
};

const TITLE: &str = "Pathway Explorer";
const SEARCH_HINT: &str = "Search name, gene or id  (/)";

/// Draws the left sidebar. `search` is the text field buffer, kept by the
/// caller between frames. Returns the actions the user triggered.
pub fn show(
    ui: &mut Ui,
    c: &Controller,
    search: &mut String,
    focus_search: bool,
) -> Vec<Action> {
    let mut actions = Vec::new();

    ScrollArea::vertical().show(ui, |ui| {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(TITLE).size(HEADING_TEXT_SIZE).strong());
        stats(ui, c);

        ui.add_space(SECTION_SPACING);
        let resp = ui.add(
            TextEdit::singleline(search)
                .hint_text(SEARCH_HINT)
                .desired_width(f32::INFINITY),
        );
        if focus_search {
            resp.request_focus();
        }
        if resp.changed() {
            actions.push(Action::Search(search.clone()));
        }

        ui.add_space(SECTION_SPACING);
        ui.horizontal(|ui| {
            if ui.button("Fit").on_hover_text("F").clicked() {
                actions.push(Action::Fit);
            }
            if ui.button("Re-layout").on_hover_text("L").clicked() {
                actions.push(Action::Relayout);
            }
            if ui.button("Reset").on_hover_text("Backspace").clicked() {
                actions.push(Action::Reset);
            }
        });

        let counts = c.counts();
        CollapsingHeader::new("Biomarker status")
            .default_open(true)
            .show(ui, |ui| {
                for s in BiomarkerStatus::ALL {
                    let accent = Some(style::status_color(s));
                    let count = Some(counts.status(s));
                    let chip = Chip::Biomarker(s);
                    chip_row(ui, c, chip, s.label(), accent, count, &mut actions);
                }
            });

        CollapsingHeader::new("Drugs").default_open(true).show(ui, |ui| {
            for d in DrugStatus::ALL {
                chip_row(ui, c, Chip::Drug(d), d.label(), None, None, &mut actions);
            }
        });

        CollapsingHeader::new("Druggability")
            .default_open(true)
            .show(ui, |ui| {
                for d in Druggability::ALL {
                    // none is counted in the unknown bucket
                    let count = (d != Druggability::NotDruggable).then(|| counts.druggability(d));
                    let accent = Some(style::druggability_badge(Some(d)).color);
                    let chip = Chip::Druggability(d);
                    chip_row(ui, c, chip, d.label(), accent, count, &mut actions);
                }
            });

        CollapsingHeader::new("Categories")
            .default_open(true)
            .show(ui, |ui| {
                for (category, count) in c.categories() {
                    let chip = Chip::Category(category.clone());
                    let accent = Some(style::category_color(category));
                    chip_row(ui, c, chip, category, accent, Some(*count), &mut actions);
                }
            });
    });

    actions
}

fn stats(ui: &mut Ui, c: &Controller) {
    let v = c.visibility();
    ui.label(
        RichText::new(format!(
            "{} nodes, showing {} nodes and {} edges",
            c.counts().total,
            v.visible_nodes,
            v.visible_edges
        ))
        .size(META_TEXT_SIZE)
        .color(style::MUTED),
    );
}

fn chip_row(
    ui: &mut Ui,
    c: &Controller,
    chip: Chip,
    label: &str,
    accent: Option<Color32>,
    count: Option<usize>,
    actions: &mut Vec<Action>,
) {
    let active = c.filter().is_active(&chip);
    ui.horizontal(|ui| {
        if let Some(color) = accent {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(8., 8.), egui::Sense::hover());
            let color = if active { color } else { color.gamma_multiply(0.3) };
            ui.painter().circle_filled(rect.center(), 4., color);
        }
        if ui.selectable_label(active, label).clicked() {
            actions.push(Action::Toggle(chip));
        }
        if let Some(count) = count {
            ui.label(
                RichText::new(count.to_string())
                    .size(COUNT_TEXT_SIZE)
                    .color(style::MUTED),
            );
        }
    });
}
