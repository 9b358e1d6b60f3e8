use eframe::egui::{self, Align, Context, Layout, ScrollArea, TextEdit};

use crate::util::plural;

use super::super::NotionCirclesApp;
use super::super::session::FormPanel;
use super::FrameOutcome;

impl NotionCirclesApp {
    pub(in crate::app) fn show(&mut self, ctx: &Context) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Notion Circles");
                    ui.separator();

                    let toggle_label = match self.session.panel {
                        FormPanel::Expanded => "Hide connection",
                        FormPanel::Minimized => "Show connection",
                    };
                    if ui.button(toggle_label).clicked() {
                        self.session.toggle_panel();
                    }

                    if let Some(tree) = self.viz.tree() {
                        ui.label(plural(tree.circles.len(), "circle", "circles"));
                        ui.label(plural(tree.role_count(), "role", "roles"));
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.session.is_loading() {
                            ui.spinner();
                            ui.label("Loading from Notion...");
                        }
                    });
                });
            });

        if self.session.panel == FormPanel::Expanded {
            egui::SidePanel::left("session_form")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| {
                    outcome.submit_requested = self.draw_form(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Filter roles");
                let mut filter = self.viz.filter().to_owned();
                let response = ui.add(
                    TextEdit::singleline(&mut filter)
                        .hint_text("name, purpose, responsibility or person")
                        .desired_width(320.0),
                );
                if response.changed() {
                    self.viz.set_filter(&filter);
                }
            });
            ui.add_space(6.0);

            ScrollArea::both().show(ui, |ui| {
                outcome.action = self.viz.draw_canvas(ui);
            });
        });

        outcome
    }
}
