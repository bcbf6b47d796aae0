use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use form_core::{
    format_amount, rupiah, strip_non_digits, today_string, CurrencyLocale, Field, FieldErrors,
    ProofFile, ProofPreview, ReimbursementDraft, RequestStatus, SubmitOutcome, SubmitSequencer,
};

use crate::backend_bridge::commands::{BackendCommand, ProofToken};
use crate::controller::events::{classify_preview_failure, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub locale: CurrencyLocale,
    pub heading: String,
    pub subheading: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            locale: CurrencyLocale::Id,
            heading: "Reimbursement Request".to_string(),
            subheading: "Alumni Treasury Desk".to_string(),
        }
    }
}

/// Fixed accent colors for the light form theme: inline errors, the success
/// banner, the pending badge, and hint text.
struct FormPalette {
    error_text: egui::Color32,
    error_fill: egui::Color32,
    success_text: egui::Color32,
    success_fill: egui::Color32,
    success_stroke: egui::Color32,
    badge_text: egui::Color32,
    badge_fill: egui::Color32,
    badge_stroke: egui::Color32,
    badge_dot: egui::Color32,
    hint_text: egui::Color32,
}

impl FormPalette {
    fn light() -> Self {
        Self {
            error_text: egui::Color32::from_rgb(220, 38, 38),
            error_fill: egui::Color32::from_rgb(254, 242, 242),
            success_text: egui::Color32::from_rgb(6, 95, 70),
            success_fill: egui::Color32::from_rgb(236, 253, 245),
            success_stroke: egui::Color32::from_rgb(167, 243, 208),
            badge_text: egui::Color32::from_rgb(146, 64, 14),
            badge_fill: egui::Color32::from_rgb(255, 251, 235),
            badge_stroke: egui::Color32::from_rgb(253, 230, 138),
            badge_dot: egui::Color32::from_rgb(245, 158, 11),
            hint_text: egui::Color32::from_rgb(100, 116, 139),
        }
    }
}

enum ProofPreviewState {
    NotRequested,
    Loading,
    Ready {
        preview: ProofPreview,
        texture: Option<TextureHandle>,
    },
    Error(String),
}

pub struct FormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    locale: CurrencyLocale,
    heading: String,
    subheading: String,

    draft: ReimbursementDraft,
    /// What the amount text box shows; the draft keeps the stripped digits.
    amount_display: String,
    errors: FieldErrors,
    sequencer: SubmitSequencer,

    proof_preview: ProofPreviewState,
    /// Bumped on every pick/replace/reset so stale worker completions are
    /// recognizable.
    proof_token: u64,

    status: String,
    palette: FormPalette,
}

impl FormApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            locale: startup.locale,
            heading: startup.heading,
            subheading: startup.subheading,
            draft: ReimbursementDraft::with_today(),
            amount_display: String::new(),
            errors: FieldErrors::new(),
            sequencer: SubmitSequencer::new(),
            proof_preview: ProofPreviewState::NotRequested,
            proof_token: 0,
            status: String::new(),
            palette: FormPalette::light(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::ProofPreviewLoaded { token, preview } => {
                    if token != ProofToken(self.proof_token) {
                        tracing::debug!(?token, "discarding stale proof preview");
                        continue;
                    }
                    tracing::debug!(
                        width = preview.width,
                        height = preview.height,
                        data_uri_len = preview.data_uri.len(),
                        "proof preview ready"
                    );
                    self.proof_preview = ProofPreviewState::Ready {
                        preview: *preview,
                        texture: None,
                    };
                }
                UiEvent::ProofPreviewFailed { token, reason } => {
                    if token != ProofToken(self.proof_token) {
                        tracing::debug!(?token, "discarding stale proof failure");
                        continue;
                    }
                    self.proof_preview =
                        ProofPreviewState::Error(classify_preview_failure(&reason));
                }
            }
        }
    }

    fn next_proof_token(&mut self) -> ProofToken {
        self.proof_token += 1;
        ProofToken(self.proof_token)
    }

    fn pick_proof_file(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Images", &["png", "jpg", "jpeg"]);
        if let Some(dir) = default_pick_dir() {
            dialog = dialog.set_directory(dir);
        }
        // Closing the dialog without a choice leaves everything as it was.
        if let Some(path) = dialog.pick_file() {
            self.accept_proof_selection(path);
        }
    }

    fn accept_proof_selection(&mut self, path: PathBuf) {
        match ProofFile::from_path(&path) {
            Ok(file) => {
                self.errors.clear(Field::Proof);
                self.proof_preview = ProofPreviewState::Loading;
                self.draft.attach_proof(file.clone());
                let token = self.next_proof_token();
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::LoadProofPreview { token, file },
                    &mut self.status,
                );
            }
            Err(err) => {
                // The rejected file is not stored; a prior selection stays.
                self.errors.insert(Field::Proof, err.to_string());
            }
        }
    }

    fn replace_proof(&mut self) {
        self.draft.clear_proof();
        self.proof_preview = ProofPreviewState::NotRequested;
        // Orphan any in-flight load for the removed file.
        self.proof_token += 1;
    }

    fn submit_clicked(&mut self) {
        match self.sequencer.submit(&self.draft, Instant::now()) {
            SubmitOutcome::Submitted => {
                self.errors = FieldErrors::new();
                self.status = "Request recorded locally".to_string();
            }
            SubmitOutcome::AlreadyPending => {}
            SubmitOutcome::Rejected(errors) => {
                self.errors = errors;
            }
        }
    }

    fn apply_reset(&mut self) {
        // The reset clears values only; the error map is left as-is.
        self.draft = ReimbursementDraft::with_today();
        self.amount_display.clear();
        self.proof_preview = ProofPreviewState::NotRequested;
        self.proof_token += 1;
    }

    fn copy_reference(&mut self, reference: &str) {
        match arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(reference.to_string()))
        {
            Ok(()) => self.status = "Reference copied to clipboard".to_string(),
            Err(err) => self.status = format!("Clipboard unavailable: {err}"),
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.add_space(16.0);
        ui.label(egui::RichText::new(&self.heading).size(26.0).strong());
        ui.label(egui::RichText::new(&self.subheading).color(self.palette.hint_text));
        ui.add_space(16.0);
    }

    fn render_success_banner(&mut self, ui: &mut egui::Ui) {
        let (reference, amount) = match self.sequencer.submitted_request() {
            Some(request) => (request.request_id.to_string(), request.amount),
            None => return,
        };

        egui::Frame::new()
            .fill(self.palette.success_fill)
            .stroke(egui::Stroke::new(1.0, self.palette.success_stroke))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Request submitted!")
                        .strong()
                        .color(self.palette.success_text),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "Your reimbursement request for {} has been recorded. \
                         The treasury team will verify it shortly.",
                        rupiah(amount, self.locale)
                    ))
                    .color(self.palette.success_text),
                );
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Reference: {reference}"))
                            .small()
                            .color(self.palette.success_text),
                    );
                    if ui.small_button("Copy").clicked() {
                        self.copy_reference(&reference);
                    }
                });
            });
        ui.add_space(12.0);
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        field_label(ui, &self.palette, Field::FullName.label(), true);
        singleline_field(
            ui,
            &self.palette,
            &mut self.errors,
            Field::FullName,
            &mut self.draft.full_name,
            "Enter your full name",
        );
        ui.add_space(12.0);

        field_label(ui, &self.palette, Field::WhatsappNumber.label(), true);
        singleline_field(
            ui,
            &self.palette,
            &mut self.errors,
            Field::WhatsappNumber,
            &mut self.draft.whatsapp_number,
            "08123456789",
        );
        ui.add_space(12.0);

        field_label(ui, &self.palette, Field::Purpose.label(), true);
        multiline_field(
            ui,
            &self.palette,
            &mut self.errors,
            Field::Purpose,
            &mut self.draft.purpose,
            "Example: stationery for the alumni reunion",
        );
        ui.add_space(12.0);

        self.render_amount_field(ui);
        ui.add_space(12.0);
        self.render_date_field(ui);
        ui.add_space(12.0);
        self.render_proof_section(ui);
        ui.add_space(12.0);
        self.render_status_badge(ui);
        ui.add_space(20.0);
        self.render_submit_button(ui);
    }

    fn render_amount_field(&mut self, ui: &mut egui::Ui) {
        field_label(ui, &self.palette, Field::Amount.label(), true);
        let has_error = self.errors.get(Field::Amount).is_some();
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Rp").strong());
            let response = ui
                .scope(|ui| {
                    if has_error {
                        ui.visuals_mut().extreme_bg_color = self.palette.error_fill;
                    }
                    ui.add(
                        egui::TextEdit::singleline(&mut self.amount_display)
                            .hint_text("150.000")
                            .desired_width(f32::INFINITY),
                    )
                })
                .inner;
            if response.changed() {
                let raw = strip_non_digits(&self.amount_display);
                self.amount_display = format_amount(&raw, self.locale);
                self.draft.amount_raw = raw;
                self.errors.clear(Field::Amount);
            }
        });
        if let Some(message) = self.errors.get(Field::Amount) {
            ui.colored_label(self.palette.error_text, message);
        }
    }

    fn render_date_field(&mut self, ui: &mut egui::Ui) {
        field_label(ui, &self.palette, Field::ExpenseDate.label(), true);
        let has_error = self.errors.get(Field::ExpenseDate).is_some();
        ui.horizontal(|ui| {
            let response = ui
                .scope(|ui| {
                    if has_error {
                        ui.visuals_mut().extreme_bg_color = self.palette.error_fill;
                    }
                    ui.add(
                        egui::TextEdit::singleline(&mut self.draft.expense_date)
                            .hint_text("YYYY-MM-DD")
                            .desired_width(160.0),
                    )
                })
                .inner;
            if response.changed() {
                self.errors.clear(Field::ExpenseDate);
            }
            if ui.button("Today").clicked() {
                self.draft.expense_date = today_string();
                self.errors.clear(Field::ExpenseDate);
            }
        });
        if let Some(message) = self.errors.get(Field::ExpenseDate) {
            ui.colored_label(self.palette.error_text, message);
        }
    }

    fn render_proof_section(&mut self, ui: &mut egui::Ui) {
        field_label(ui, &self.palette, Field::Proof.label(), true);

        let mut pick_clicked = false;
        let mut replace_clicked = false;

        let has_error = self.errors.get(Field::Proof).is_some();
        let fill = if has_error {
            self.palette.error_fill
        } else {
            ui.visuals().faint_bg_color
        };
        egui::Frame::group(ui.style())
            .fill(fill)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                match (&self.draft.proof, &mut self.proof_preview) {
                    (None, _) => {
                        ui.vertical_centered(|ui| {
                            if ui.button("Upload proof image").clicked() {
                                pick_clicked = true;
                            }
                            ui.label(
                                egui::RichText::new("JPG, JPEG, or PNG, at most 5 MB")
                                    .small()
                                    .color(self.palette.hint_text),
                            );
                        });
                    }
                    (Some(file), ProofPreviewState::Loading) => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(format!("Loading preview for {}...", file.filename));
                        });
                    }
                    (Some(file), ProofPreviewState::Ready { preview, texture }) => {
                        if texture.is_none() {
                            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                                [preview.width, preview.height],
                                &preview.rgba,
                            );
                            *texture = Some(ui.ctx().load_texture(
                                "proof_preview",
                                color_image,
                                egui::TextureOptions::LINEAR,
                            ));
                        }
                        if let Some(texture) = texture.as_ref() {
                            let max_width = (ui.available_width() * 0.8).clamp(120.0, 420.0);
                            let mut size = texture.size_vec2();
                            if size.x > max_width {
                                size *= max_width / size.x;
                            }
                            if size.y > 280.0 {
                                size *= 280.0 / size.y;
                            }
                            ui.vertical_centered(|ui| {
                                ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                            });
                        }
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} ({})",
                                    file.filename,
                                    human_readable_bytes(file.size_bytes)
                                ))
                                .small()
                                .color(self.palette.hint_text),
                            );
                            if ui.button("Replace image").clicked() {
                                replace_clicked = true;
                            }
                        });
                    }
                    (Some(file), ProofPreviewState::Error(reason)) => {
                        ui.colored_label(
                            self.palette.error_text,
                            format!("Couldn't preview {}: {reason}", file.filename),
                        );
                        if ui.button("Replace image").clicked() {
                            replace_clicked = true;
                        }
                    }
                    (Some(file), ProofPreviewState::NotRequested) => {
                        // Transient: every accepted pick dispatches a load.
                        ui.label(file.filename.clone());
                    }
                }
            });

        if let Some(message) = self.errors.get(Field::Proof) {
            ui.colored_label(self.palette.error_text, message);
        }

        if pick_clicked {
            self.pick_proof_file();
        }
        if replace_clicked {
            self.replace_proof();
        }
    }

    fn render_status_badge(&self, ui: &mut egui::Ui) {
        field_label(ui, &self.palette, "Status", false);
        egui::Frame::new()
            .fill(self.palette.badge_fill)
            .stroke(egui::Stroke::new(1.0, self.palette.badge_stroke))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 4.0, self.palette.badge_dot);
                    ui.label(
                        egui::RichText::new(RequestStatus::PendingVerification.label())
                            .strong()
                            .color(self.palette.badge_text),
                    );
                });
            });
    }

    fn render_submit_button(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.sequencer.is_submitted();
        let response = ui
            .add_enabled_ui(enabled, |ui| {
                ui.add_sized(
                    [ui.available_width(), 40.0],
                    egui::Button::new(egui::RichText::new("Submit request").strong().size(15.0)),
                )
            })
            .inner;
        if response.clicked() {
            self.submit_clicked();
        }
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Make sure everything is correct before submitting.")
                    .small()
                    .color(self.palette.hint_text),
            );
            if !self.status.is_empty() {
                ui.label(
                    egui::RichText::new(&self.status)
                        .small()
                        .color(self.palette.hint_text),
                );
            }
        });
        ui.add_space(12.0);
    }
}

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let now = Instant::now();
        if self.sequencer.poll(now) {
            self.apply_reset();
        }
        if let Some(remaining) = self.sequencer.time_until_reset(now) {
            // Keep frames coming while the submitted banner counts down.
            ctx.request_repaint_after(remaining.min(Duration::from_millis(200)));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let max_width = ui.available_width().min(640.0);
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(max_width);
                        self.render_header(ui);
                        self.render_success_banner(ui);
                        self.render_form(ui);
                        self.render_footer(ui);
                    });
                });
        });
    }
}

fn field_label(ui: &mut egui::Ui, palette: &FormPalette, text: &str, required: bool) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong());
        if required {
            ui.colored_label(palette.error_text, "*");
        }
    });
}

fn singleline_field(
    ui: &mut egui::Ui,
    palette: &FormPalette,
    errors: &mut FieldErrors,
    field: Field,
    value: &mut String,
    hint: &str,
) {
    let has_error = errors.get(field).is_some();
    let response = ui
        .scope(|ui| {
            if has_error {
                ui.visuals_mut().extreme_bg_color = palette.error_fill;
            }
            ui.add(
                egui::TextEdit::singleline(value)
                    .hint_text(hint)
                    .desired_width(f32::INFINITY),
            )
        })
        .inner;
    if response.changed() {
        errors.clear(field);
    }
    if let Some(message) = errors.get(field) {
        ui.colored_label(palette.error_text, message);
    }
}

fn multiline_field(
    ui: &mut egui::Ui,
    palette: &FormPalette,
    errors: &mut FieldErrors,
    field: Field,
    value: &mut String,
    hint: &str,
) {
    let has_error = errors.get(field).is_some();
    let response = ui
        .scope(|ui| {
            if has_error {
                ui.visuals_mut().extreme_bg_color = palette.error_fill;
            }
            ui.add(
                egui::TextEdit::multiline(value)
                    .hint_text(hint)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            )
        })
        .inner;
    if response.changed() {
        errors.clear(field);
    }
    if let Some(message) = errors.get(field) {
        ui.colored_label(palette.error_text, message);
    }
}

fn default_pick_dir() -> Option<PathBuf> {
    dirs::picture_dir()
        .or_else(dirs::download_dir)
        .or_else(dirs::document_dir)
        .or_else(dirs::home_dir)
}

fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }
    let (value, unit) = if bytes < MB {
        (bytes as f64 / KB as f64, "KB")
    } else {
        (bytes as f64 / MB as f64, "MB")
    };
    let text = format!("{value:.1}");
    let compact = text.strip_suffix(".0").unwrap_or(&text);
    format!("{compact} {unit}")
}
