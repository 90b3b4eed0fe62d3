#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{fs, path::Path};
use zeta_torsion_controller::{
    app, config,
    i18n::{self, keys},
    lay_length::{AdjustStep, ADJUST_STEPS, LAY_LENGTH_MAX_MM, LAY_LENGTH_MIN_MM},
    session::{Action, Session},
    torsion::RotationResult,
};

const DECREASE_FILL: egui::Color32 = egui::Color32::from_rgb(0xd3, 0x2f, 0x2f);
const INCREASE_FILL: egui::Color32 = egui::Color32::from_rgb(0x2e, 0x7d, 0x32);

#[derive(Parser)]
#[command(author, version, about = "Zeta Torsion Controller (desktop)", long_about = None)]
struct GuiArgs {
    /// 언어 코드 (auto/ko/en-us)
    #[arg(long, short = 'L')]
    lang: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| app::DEFAULT_LOG_FILTER.into()),
        )
        .init();
    let args = GuiArgs::parse();

    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        config::Config::default()
    });
    if let Some(lang_cli) = args.lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([900.0, 640.0])
        .with_transparent(true);
    if app_cfg.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Zeta Torsion Controller",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 바이너리 폰트 바이트를 egui 기본 폰트 앞에 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾는다.
/// 1) assets/fonts/ 2) Windows 시스템 폰트 3) 리눅스 Noto CJK. 모두 없으면 Err.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
        Path::new("assets/fonts/NotoSansKR-Regular.ttf").to_path_buf(),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.push("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into());
    candidates.push("/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc".into());

    let p = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Hangul font not found; Korean labels may not render.".to_string())?;
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font ({}): {e}", p.display()))?;
    apply_font_bytes(ctx, bytes, "hangul_font");
    tracing::debug!(path = %p.display(), "font loaded");
    Ok(())
}

fn step_fill(step: &AdjustStep) -> egui::Color32 {
    if step.is_decrease() {
        DECREASE_FILL
    } else {
        INCREASE_FILL
    }
}

fn metric(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(label).small().weak());
        ui.label(egui::RichText::new(value).size(28.0).strong());
    });
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    session: Session,
    total_length_text: String,
    total_length_error: Option<String>,
    show_settings_modal: bool,
    lang_input: String,
    lang_pack_dir_input: String,
    settings_status: Option<String>,
    window_alpha: f32,
    always_on_top: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        tracing::info!(lang = %lang_code, "GUI language resolved");
        let session = Session::from_config(&config);
        Self {
            tr,
            total_length_text: format!("{:.1}", session.total_length_mm()),
            session,
            total_length_error: None,
            show_settings_modal: false,
            lang_input: config.language.clone(),
            lang_pack_dir_input: config.language_pack_dir.clone().unwrap_or_default(),
            settings_status: None,
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            always_on_top: config.always_on_top,
            config,
        }
    }

    /// 동작을 세션에 적용한다. 결과는 다음 읽기에서 새로 계산된다.
    fn dispatch(&mut self, action: Action) {
        self.session.apply(action);
        if let Action::Reset = action {
            tracing::info!("lay length reset");
        }
    }

    /// 전체 길이 입력란 내용이 바뀌었을 때 호출한다.
    fn commit_total_length(&mut self) {
        match self.session.set_total_length_text(&self.total_length_text) {
            Ok(_) => self.total_length_error = None,
            Err(e) => {
                self.total_length_error = Some(format!(
                    "{} ({e})",
                    self.tr.t(keys::ERROR_INVALID_TOTAL_LENGTH)
                ))
            }
        }
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.language_pack_dir = if self.lang_pack_dir_input.trim().is_empty() {
            None
        } else {
            Some(self.lang_pack_dir_input.trim().to_string())
        };
        self.config.window_alpha = self.window_alpha;
        self.config.always_on_top = self.always_on_top;
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
            Err(e) => {
                tracing::error!(error = %e, "settings save failed");
                format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))
            }
        });
    }

    fn ui_readouts(&mut self, ui: &mut egui::Ui) {
        let readout = self.session.readout();
        ui.add(egui::ProgressBar::new(readout.progress as f32).show_percentage());
        ui.add_space(6.0);
        ui.columns(2, |cols| {
            metric(&mut cols[0], &self.tr.t(keys::READOUT_LAY_LENGTH), &readout.lay_length_text());
            metric(&mut cols[1], &self.tr.t(keys::READOUT_LAY_LENGTH_IN), &readout.lay_length_in_text());
        });
    }

    /// 조정 버튼 패널. 버튼은 `ADJUST_STEPS` 테이블에서 만든다.
    fn ui_adjust_panel(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(self.tr.t(keys::ADJUST_HEADING).trim()).strong());
        });
        let mut clicked = None;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.style_mut().wrap = Some(false);
            ui.horizontal(|ui| {
                for (i, step) in ADJUST_STEPS.iter().enumerate() {
                    if i > 0 && !step.is_decrease() && ADJUST_STEPS[i - 1].is_decrease() {
                        ui.add_space(12.0);
                    }
                    let button = egui::Button::new(
                        egui::RichText::new(step.label)
                            .strong()
                            .color(egui::Color32::WHITE),
                    )
                    .fill(step_fill(step))
                    .min_size(egui::vec2(64.0, 36.0));
                    if ui.add(button).clicked() {
                        clicked = Some(step.delta);
                    }
                }
            });
            ui.add_space(4.0);
            let mut p = self.session.lay_length().value();
            let slider = egui::Slider::new(&mut p, LAY_LENGTH_MIN_MM..=LAY_LENGTH_MAX_MM)
                .suffix(" mm")
                .text(self.tr.t(keys::DIRECT_SET));
            if ui.add(slider).changed() {
                self.dispatch(Action::SetLayLength(p));
            }
        });
        if let Some(delta) = clicked {
            self.dispatch(Action::Adjust(delta));
        }
    }

    fn ui_total_length(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("{} [mm]", self.tr.t(keys::READOUT_TOTAL_LENGTH)));
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.total_length_text).desired_width(160.0),
            );
            if resp.changed() {
                self.commit_total_length();
            }
            ui.separator();
            let readout = self.session.readout();
            metric(ui, &self.tr.t(keys::READOUT_TOTAL_INCHES), &readout.total_length_in_text());
        });
        if let Some(err) = &self.total_length_error {
            let color = ui.visuals().error_fg_color;
            ui.colored_label(color, err);
        }
    }

    fn ui_result(&mut self, ui: &mut egui::Ui) {
        let mut active = !self.session.bypass_active();
        if ui.checkbox(&mut active, self.tr.t(keys::UNTWIST_ACTIVE)).changed() {
            self.dispatch(Action::SetBypass(!active));
        }
        ui.add_space(6.0);
        let readout = self.session.readout();
        let text = readout.result_text(&self.tr);
        let color = match readout.result {
            RotationResult::Rotations(_) => INCREASE_FILL,
            RotationResult::Bypassed => ui.visuals().warn_fg_color,
            RotationResult::InvalidPitch => ui.visuals().error_fg_color,
        };
        ui.label(egui::RichText::new(text).size(24.0).strong().color(color));
        ui.add_space(10.0);
        if ui.button(self.tr.t(keys::RESET_BUTTON)).clicked() {
            self.dispatch(Action::Reset);
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("🌀 {}", tr.t(keys::APP_TITLE)));
                ui.separator();
                if ui.button(tr.t(keys::SETTINGS_TITLE)).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut save_clicked = false;
            egui::Window::new(tr.t(keys::SETTINGS_TITLE))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(self.lang_input.clone())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), tr.t(keys::SETTINGS_LANG_AUTO));
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    ui.separator();
                    ui.label(tr.t(keys::SETTINGS_LANG_PACK_DIR));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.lang_pack_dir_input);
                        if ui.button(tr.t(keys::SETTINGS_BROWSE)).clicked() {
                            if let Some(dir) = FileDialog::new().pick_folder() {
                                self.lang_pack_dir_input = dir.display().to_string();
                            }
                        }
                    });
                    ui.separator();
                    ui.checkbox(&mut self.always_on_top, tr.t(keys::SETTINGS_ALWAYS_ON_TOP));
                    ui.label(tr.t(keys::SETTINGS_ALPHA));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    if ui.button(tr.t(keys::SETTINGS_SAVE)).clicked() {
                        save_clicked = true;
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
            if save_clicked {
                self.save_settings();
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_readouts(ui);
                    ui.add_space(8.0);
                    self.ui_adjust_panel(ui);
                    ui.separator();
                    self.ui_total_length(ui);
                    ui.separator();
                    self.ui_result(ui);
                });
        });
    }
}
