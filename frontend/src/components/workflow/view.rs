//! View rendering for the workflow component.
//!
//! One `view` entry point dispatches on the active [`Route`]; each screen
//! is built by its own function. Tool workspaces share the file grid and
//! differ only in the sidebar.

use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use common::jobs::{CompressionLevel, JobType};
use common::model::format::{format_size, saved_percentage};
use common::model::split::{RangeField, SplitMode, SplitRange};

use super::helpers::{format_mb, tool_description};
use super::messages::Msg;
use super::state::{DownloadInfo, Route, UploadRun, WorkflowComponent};

pub fn view(component: &WorkflowComponent, ctx: &Context<WorkflowComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="workflow-root">
            { build_header(link) }
            {
                match &component.route {
                    Route::Home => build_home(link),
                    Route::Tool(tool) => build_tool(component, link, *tool),
                    Route::Uploading => build_uploading(component),
                    Route::UnlockPassword => build_password(component, link),
                    Route::Processing => build_processing(component),
                    Route::Download(info) => build_download(link, info),
                }
            }
        </div>
    }
}

fn build_header(link: &Scope<WorkflowComponent>) -> Html {
    html! {
        <header class="top-bar">
            <button class="brand" onclick={link.callback(|_| Msg::GoHome)}>
                { "PDF Tools" }
            </button>
            <nav class="tool-nav">
                {
                    JobType::all().iter().map(|tool| {
                        let tool = *tool;
                        html! {
                            <button class="tool-link"
                                onclick={link.callback(move |_| Msg::SelectTool(tool))}>
                                { tool.label() }
                            </button>
                        }
                    }).collect::<Html>()
                }
            </nav>
        </header>
    }
}

fn build_home(link: &Scope<WorkflowComponent>) -> Html {
    html! {
        <main class="home">
            <h1>{ "Every tool you need to work with PDFs" }</h1>
            <div class="tool-cards">
                {
                    JobType::all().iter().map(|tool| {
                        let tool = *tool;
                        html! {
                            <div class="tool-card"
                                onclick={link.callback(move |_| Msg::SelectTool(tool))}>
                                <h3>{ tool.label() }</h3>
                                <p>{ tool_description(tool) }</p>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
        </main>
    }
}

fn build_tool(
    component: &WorkflowComponent,
    link: &Scope<WorkflowComponent>,
    tool: JobType,
) -> Html {
    let onchange = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut selected = Vec::new();
        if let Some(list) = input.files() {
            for i in 0..list.length() {
                if let Some(file) = list.get(i) {
                    selected.push(gloo_file::File::from(file));
                }
            }
        }
        // Allow re-selecting the same file later.
        input.set_value("");
        Msg::FilesSelected(selected)
    });

    html! {
        <main class="tool-workspace">
            <h1>{ tool.label() }</h1>
            {
                if let Some(error) = &component.error {
                    html! { <div class="error-banner">{ error }</div> }
                } else {
                    html! {}
                }
            }
            <input
                ref={component.file_input_ref.clone()}
                type="file"
                accept="application/pdf"
                multiple={tool.min_files() > 1}
                style="display: none"
                {onchange}
            />
            <button class="select-files"
                onclick={link.callback(|_| Msg::OpenFilePicker)}>
                { "Select PDF files" }
            </button>

            { build_file_grid(component, link) }

            <aside class="tool-sidebar">
                { build_sidebar(component, link, tool) }
                { build_action_button(component, link, tool) }
            </aside>
        </main>
    }
}

/// Preview cards for the staged files, draggable to reorder.
fn build_file_grid(component: &WorkflowComponent, link: &Scope<WorkflowComponent>) -> Html {
    html! {
        <div class="file-grid">
            {
                component.files.iter().enumerate().map(|(index, file)| {
                    let id = file.id.clone();
                    let ondragstart = link.callback(move |_: DragEvent| Msg::DragStart(index));
                    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());
                    let ondrop = link.callback(move |e: DragEvent| {
                        e.prevent_default();
                        Msg::DropOn(index)
                    });
                    html! {
                        <div class="file-card" key={file.id.clone()}
                            draggable="true"
                            {ondragstart} {ondragover} {ondrop}>
                            {
                                match &file.preview_url {
                                    Some(url) => html! {
                                        <img class="file-preview" src={url.clone()} alt={file.name.clone()} />
                                    },
                                    None => html! {
                                        <div class="file-preview placeholder">{ "PDF" }</div>
                                    },
                                }
                            }
                            <span class="file-name">{ &file.name }</span>
                            <span class="file-size">{ format_size(file.size) }</span>
                            <button class="remove-file"
                                onclick={link.callback(move |_| Msg::RemoveFile(id.clone()))}>
                                { "×" }
                            </button>
                        </div>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

fn build_sidebar(
    component: &WorkflowComponent,
    link: &Scope<WorkflowComponent>,
    tool: JobType,
) -> Html {
    match tool {
        JobType::Merge => html! {
            <p class="sidebar-hint">
                { "Drag the files to set the order they will be merged in." }
            </p>
        },
        JobType::Split => build_split_sidebar(component, link),
        JobType::Compress => build_compress_sidebar(component, link),
        JobType::Protect => build_protect_sidebar(component, link),
        JobType::Unlock => html! {
            <p class="sidebar-hint">
                { "If the document is protected you will be asked for its password." }
            </p>
        },
    }
}

fn build_split_sidebar(
    component: &WorkflowComponent,
    link: &Scope<WorkflowComponent>,
) -> Html {
    let split = &component.split;
    let total = component.total_pages().unwrap_or(0);

    html! {
        <div class="split-options">
            <div class="mode-tabs">
                <button
                    class={classes!("mode-tab", (split.mode == SplitMode::Custom).then_some("active"))}
                    onclick={link.callback(|_| Msg::SetSplitMode(SplitMode::Custom))}>
                    { "Custom ranges" }
                </button>
                <button
                    class={classes!("mode-tab", (split.mode == SplitMode::Fixed).then_some("active"))}
                    onclick={link.callback(|_| Msg::SetSplitMode(SplitMode::Fixed))}>
                    { "Fixed ranges" }
                </button>
            </div>
            {
                match split.mode {
                    SplitMode::Custom => build_custom_ranges(component, link),
                    SplitMode::Fixed => build_fixed_ranges(component, link, total),
                }
            }
            <label class="merge-toggle">
                <input type="checkbox"
                    checked={split.merge_output}
                    onchange={link.callback(|_| Msg::ToggleMergeOutput)} />
                { "Merge all ranges in one PDF file" }
            </label>
        </div>
    }
}

fn build_custom_ranges(
    component: &WorkflowComponent,
    link: &Scope<WorkflowComponent>,
) -> Html {
    let can_reorder = component.split.can_reorder();
    let count = component.split.ranges.len();

    html! {
        <div class="custom-ranges">
            {
                component.split.ranges.iter().enumerate().map(|(index, range)| {
                    build_range_row(link, index, range, count, can_reorder)
                }).collect::<Html>()
            }
            <button class="add-range" onclick={link.callback(|_| Msg::AddSplitRange)}>
                { "+ Add range" }
            </button>
        </div>
    }
}

fn build_range_row(
    link: &Scope<WorkflowComponent>,
    index: usize,
    range: &SplitRange,
    count: usize,
    can_reorder: bool,
) -> Html {
    let on_from = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::EditSplitRange {
            index,
            field: RangeField::From,
            value: input.value().parse().unwrap_or(1),
        }
    });
    let on_to = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::EditSplitRange {
            index,
            field: RangeField::To,
            value: input.value().parse().unwrap_or(1),
        }
    });

    html! {
        <div class="range-row" key={range.id.clone()}>
            <span class="range-label">{ format!("Range {}", index + 1) }</span>
            <input type="number" min="1" value={range.from.to_string()} oninput={on_from} />
            <span>{ "to" }</span>
            <input type="number" min="1" value={range.to.to_string()} oninput={on_to} />
            {
                if can_reorder && index > 0 {
                    html! {
                        <button class="move-range"
                            onclick={link.callback(move |_| Msg::ReorderSplitRanges {
                                from: index,
                                to: index - 1,
                            })}>
                            { "↑" }
                        </button>
                    }
                } else {
                    html! {}
                }
            }
            {
                if can_reorder && index + 1 < count {
                    html! {
                        <button class="move-range"
                            onclick={link.callback(move |_| Msg::ReorderSplitRanges {
                                from: index,
                                to: index + 1,
                            })}>
                            { "↓" }
                        </button>
                    }
                } else {
                    html! {}
                }
            }
            {
                // The seeded full-document range stays put.
                if index > 0 {
                    html! {
                        <button class="remove-range"
                            onclick={link.callback(move |_| Msg::RemoveSplitRange(index))}>
                            { "×" }
                        </button>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_fixed_ranges(
    component: &WorkflowComponent,
    link: &Scope<WorkflowComponent>,
    total: u32,
) -> Html {
    let oninput = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetFixedRange(input.value().parse().unwrap_or(1))
    });
    let chunks = component.split.fixed_ranges(total).len();

    html! {
        <div class="fixed-ranges">
            <label>
                { "Split in page ranges of: " }
                <input type="number" min="1"
                    value={component.split.fixed_range.to_string()}
                    {oninput} />
            </label>
            {
                if total > 0 {
                    html! {
                        <p class="chunk-summary">
                            { format!("This PDF will be split in files of {} pages. {} PDFs will be created.",
                                component.split.fixed_range, chunks) }
                        </p>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_compress_sidebar(
    component: &WorkflowComponent,
    link: &Scope<WorkflowComponent>,
) -> Html {
    let levels = [
        (
            CompressionLevel::Extreme,
            "Less quality, high compression",
        ),
        (
            CompressionLevel::Recommended,
            "Good quality, good compression",
        ),
        (CompressionLevel::Less, "High quality, less compression"),
    ];

    html! {
        <div class="compress-options">
            {
                levels.iter().map(|(level, hint)| {
                    let level = *level;
                    let selected = component.compression == level;
                    html! {
                        <button
                            class={classes!("compression-level", selected.then_some("selected"))}
                            onclick={link.callback(move |_| Msg::SetCompression(level))}>
                            <span class="level-name">{ level.label() }</span>
                            <span class="level-hint">{ *hint }</span>
                        </button>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}

fn build_protect_sidebar(
    component: &WorkflowComponent,
    link: &Scope<WorkflowComponent>,
) -> Html {
    let mismatch = !component.protect_repeat.is_empty()
        && component.protect_password != component.protect_repeat;

    html! {
        <div class="protect-options">
            <input type="password" placeholder="Type your password"
                value={component.protect_password.clone()}
                oninput={link.callback(|e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::SetProtectPassword(input.value())
                })} />
            <input type="password" placeholder="Repeat your password"
                value={component.protect_repeat.clone()}
                oninput={link.callback(|e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::SetProtectRepeat(input.value())
                })} />
            {
                if mismatch {
                    html! { <p class="password-mismatch">{ "Passwords do not match." }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

/// The main call-to-action. Disabled until the tool's requirements are met,
/// with a hint explaining what is missing.
fn build_action_button(
    component: &WorkflowComponent,
    link: &Scope<WorkflowComponent>,
    tool: JobType,
) -> Html {
    let missing_files = component.files.len() < tool.min_files();
    let bad_password = tool == JobType::Protect
        && (component.protect_password.is_empty()
            || component.protect_password != component.protect_repeat);
    let disabled = missing_files || bad_password;

    let hint = if missing_files {
        match tool {
            JobType::Merge => Some("Select at least 2 PDF files."),
            _ => Some("Select a PDF file."),
        }
    } else if bad_password {
        Some("Type the same password twice.")
    } else {
        None
    };

    html! {
        <div class="action">
            <button class="action-button" {disabled}
                onclick={link.callback(|_| Msg::StartUploadPhase)}>
                { tool.label() }
            </button>
            {
                if let Some(hint) = hint {
                    html! { <p class="action-hint">{ hint }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_uploading(component: &WorkflowComponent) -> Html {
    let Some(run) = component.upload.as_ref() else {
        return html! {};
    };
    let total = component.files.len();
    let current = component.files.get(run.current_index);
    let percent = run.stats.percent();

    html! {
        <main class="uploading">
            <h2>{ format!("Uploading file {} of {}", run.current_index + 1, total) }</h2>
            {
                if let Some(file) = current {
                    html! {
                        <p class="uploading-file">
                            { &file.name }{ " (" }{ format_mb(file.size as f64) }{ ")" }
                        </p>
                    }
                } else {
                    html! {}
                }
            }
            <div class="progress-track">
                <div class="progress-fill" style={format!("width: {percent}%")}></div>
            </div>
            <p class="progress-percent">{ format!("{percent}%") }</p>
            { build_transfer_stats(run) }
            <p class="upload-status">{ run.status_text }</p>
        </main>
    }
}

fn build_transfer_stats(run: &UploadRun) -> Html {
    let speed = run.stats.speed_mb_per_s();
    if speed <= 0.0 {
        return html! {};
    }
    let eta = run.stats.eta_seconds().ceil() as u64;
    html! {
        <p class="transfer-stats">
            { format!("Time left {eta} SECONDS - Upload speed {speed:.2} MB/S") }
        </p>
    }
}

fn build_password(component: &WorkflowComponent, link: &Scope<WorkflowComponent>) -> Html {
    let disabled = component.unlock_password.is_empty();

    html! {
        <main class="unlock-password">
            <h2>{ "This PDF is protected" }</h2>
            <p>{ "Enter the password to remove its security." }</p>
            <input type="password" placeholder="Password"
                value={component.unlock_password.clone()}
                oninput={link.callback(|e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::SetUnlockPassword(input.value())
                })} />
            <button class="action-button" {disabled}
                onclick={link.callback(|_| Msg::SubmitUnlockPassword)}>
                { "Unlock PDF" }
            </button>
        </main>
    }
}

fn build_processing(component: &WorkflowComponent) -> Html {
    html! {
        <main class="processing">
            <div class="spinner"></div>
            <h2>{ &component.processing_text }</h2>
            <p class="processing-warning">{ "Do not close your browser. Wait until your files are ready." }</p>
        </main>
    }
}

fn build_download(link: &Scope<WorkflowComponent>, info: &DownloadInfo) -> Html {
    let title = match info.job_type {
        JobType::Merge => "Your PDFs have been merged!",
        JobType::Split => "Your PDF has been split!",
        JobType::Compress => "Your PDF has been compressed!",
        JobType::Protect => "Your PDF has been protected!",
        JobType::Unlock => "Your PDF has been unlocked!",
    };
    let tool = info.job_type;

    html! {
        <main class="download">
            <h2>{ title }</h2>
            { build_compression_summary(info) }
            <a class="download-button" href={info.url.clone()} download="">
                { "Download file" }
            </a>
            <button class="restart"
                onclick={link.callback(move |_| Msg::SelectTool(tool))}>
                { format!("Continue to {}", tool.label()) }
            </button>
        </main>
    }
}

/// Size comparison shown after a compress job, when the service reported
/// both sizes.
fn build_compression_summary(info: &DownloadInfo) -> Html {
    let (Some(original), Some(compressed)) = (info.original_size, info.compressed_size) else {
        return html! {};
    };
    let saved = saved_percentage(original, compressed);

    html! {
        <p class="compression-summary">
            { format!("Your PDF is now {}% smaller: {} to {}",
                saved, format_size(original), format_size(compressed)) }
        </p>
    }
}
