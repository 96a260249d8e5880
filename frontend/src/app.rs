use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::Task;
use uuid::Uuid;
use web_sys::window;

use crate::api;
use crate::form::TaskForm;
use crate::state::{BannerKind, FetchStatus, TasksState};

/// How long a status banner stays up before it is auto-cleared.
const BANNER_MS: i32 = 3000;

#[derive(Debug, Clone)]
pub enum Msg {
    LoadTasks,
    TasksLoaded(Vec<Task>),
    LoadFailed(String),

    OpenAddForm,
    OpenEditForm(Uuid),
    CloseForm,
    TitleChanged(String),
    DescriptionChanged(String),
    CompletedToggled(bool),
    Submit,

    TaskCreated(Task),
    TaskUpdated(Task),
    DeleteTask(Uuid),
    TaskDeleted(Uuid),
    OperationFailed(String),

    BannerExpired(u64),
}

#[derive(Default)]
pub struct App {
    state: TasksState,
    form: Option<TaskForm>,
    saving: bool,
}

impl Application for App {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::new(async { Msg::LoadTasks })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::LoadTasks => {
                self.state.fetch_started();
                Cmd::new(async {
                    match api::list_tasks().await {
                        Ok(tasks) => Msg::TasksLoaded(tasks),
                        Err(e) => Msg::LoadFailed(e),
                    }
                })
            }
            Msg::TasksLoaded(tasks) => {
                self.state.fetch_succeeded(tasks);
                Cmd::none()
            }
            Msg::LoadFailed(message) => {
                let seq = self.state.fetch_failed(message);
                banner_timer(seq)
            }
            Msg::OpenAddForm => {
                if !self.saving {
                    self.form = Some(TaskForm::blank());
                }
                Cmd::none()
            }
            Msg::OpenEditForm(id) => {
                if !self.saving {
                    if let Some(task) = self.state.tasks.iter().find(|t| t.id == id) {
                        self.form = Some(TaskForm::for_task(task));
                    }
                }
                Cmd::none()
            }
            Msg::CloseForm => {
                self.form = None;
                Cmd::none()
            }
            Msg::TitleChanged(title) => {
                if let Some(form) = &mut self.form {
                    form.title = title;
                }
                Cmd::none()
            }
            Msg::DescriptionChanged(description) => {
                if let Some(form) = &mut self.form {
                    form.description = description;
                }
                Cmd::none()
            }
            Msg::CompletedToggled(completed) => {
                if let Some(form) = &mut self.form {
                    form.completed = completed;
                }
                Cmd::none()
            }
            Msg::Submit => {
                if self.saving {
                    return Cmd::none();
                }
                let Some(form) = &mut self.form else {
                    return Cmd::none();
                };
                // Validation failures stay local; no request goes out.
                if !form.validate() {
                    return Cmd::none();
                }
                self.saving = true;
                match form.editing {
                    Some(id) => {
                        let patch = form.patch();
                        Cmd::new(async move {
                            match api::update_task(id, &patch).await {
                                Ok(task) => Msg::TaskUpdated(task),
                                Err(e) => Msg::OperationFailed(e),
                            }
                        })
                    }
                    None => {
                        let draft = form.draft();
                        Cmd::new(async move {
                            match api::create_task(&draft).await {
                                Ok(task) => Msg::TaskCreated(task),
                                Err(e) => Msg::OperationFailed(e),
                            }
                        })
                    }
                }
            }
            Msg::TaskCreated(task) => {
                self.saving = false;
                self.form = None;
                let seq = self.state.task_added(task);
                banner_timer(seq)
            }
            Msg::TaskUpdated(task) => {
                self.saving = false;
                self.form = None;
                let seq = self.state.task_updated(task);
                banner_timer(seq)
            }
            Msg::DeleteTask(id) => Cmd::new(async move {
                match api::delete_task(id).await {
                    Ok(_) => Msg::TaskDeleted(id),
                    Err(e) => Msg::OperationFailed(e),
                }
            }),
            Msg::TaskDeleted(id) => {
                let seq = self.state.task_removed(id);
                banner_timer(seq)
            }
            Msg::OperationFailed(message) => {
                self.saving = false;
                let seq = self.state.operation_failed(message);
                banner_timer(seq)
            }
            Msg::BannerExpired(seq) => {
                self.state.clear_banner(seq);
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("max-w-4xl mx-auto px-4 py-8")],
            [
                self.view_header(),
                self.view_banner(),
                h2([class("text-xl font-semibold mb-4")], [text("Current Tasks")]),
                self.view_task_list(),
                self.view_dialog(),
            ],
        )
    }
}

impl App {
    fn view_header(&self) -> Node<Msg> {
        div(
            [class("flex justify-between items-center bg-white shadow-md px-4 py-2 mb-6 rounded")],
            [
                h1([class("text-3xl font-bold text-blue-500")], [text("Task Manager")]),
                button(
                    [
                        on_click(|_| Msg::OpenAddForm),
                        disabled(self.saving),
                        class("bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded disabled:opacity-50"),
                    ],
                    [text("Add Task")],
                ),
            ],
        )
    }

    fn view_banner(&self) -> Node<Msg> {
        match &self.state.banner {
            Some(banner) => div(
                [class(&format!(
                    "mb-4 p-2 rounded {}",
                    match banner.kind {
                        BannerKind::Success => "bg-green-200",
                        BannerKind::Error => "bg-red-200",
                    }
                ))],
                [text(&banner.text)],
            ),
            None => span([], []),
        }
    }

    fn view_task_list(&self) -> Node<Msg> {
        if self.state.status == FetchStatus::Loading {
            return div(
                [class("bg-white rounded-lg shadow-md p-4 text-center")],
                [text("Loading...")],
            );
        }
        if self.state.tasks.is_empty() {
            return div(
                [class("bg-white rounded-lg shadow-md p-4 text-center text-gray-500")],
                [text("No tasks available.")],
            );
        }
        div(
            [class("grid gap-4")],
            self.state
                .tasks
                .iter()
                .map(|task| self.view_task(task))
                .collect::<Vec<_>>(),
        )
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        div(
            [
                key(task.id.to_string()),
                class("bg-white rounded-lg shadow-md p-4 transition duration-300 hover:bg-gray-100"),
            ],
            [
                h3([class("text-lg font-semibold mb-2")], [text(&task.title)]),
                p([class("mb-2")], [text(&task.description)]),
                p(
                    [class("mb-2 text-sm text-gray-600")],
                    [text(&format!(
                        "Status: {}",
                        if task.completed {
                            "Completed"
                        } else {
                            "Not Completed"
                        }
                    ))],
                ),
                div(
                    [class("flex gap-2")],
                    [
                        button(
                            [
                                on_click({
                                    let id = task.id;
                                    move |_| Msg::OpenEditForm(id)
                                }),
                                disabled(self.saving),
                                class("bg-yellow-500 hover:bg-yellow-600 text-white font-bold py-1 px-3 rounded disabled:opacity-50"),
                            ],
                            [text("Edit")],
                        ),
                        button(
                            [
                                on_click({
                                    let id = task.id;
                                    move |_| Msg::DeleteTask(id)
                                }),
                                class("bg-red-500 hover:bg-red-700 text-white font-bold py-1 px-3 rounded"),
                            ],
                            [text("Delete")],
                        ),
                    ],
                ),
            ],
        )
    }

    fn view_dialog(&self) -> Node<Msg> {
        let Some(form) = &self.form else {
            return span([], []);
        };
        div(
            [class("fixed inset-0 flex items-center justify-center bg-gray-800 bg-opacity-75")],
            [div(
                [class("bg-white shadow-md rounded-lg p-6 max-w-lg w-full")],
                [
                    h2(
                        [class("text-xl font-semibold mb-4")],
                        [text(if form.is_editing() { "Edit Task" } else { "Add Task" })],
                    ),
                    div(
                        [class("mb-4")],
                        [
                            label(
                                [class("block text-gray-700 text-sm font-bold mb-2")],
                                [text("Title")],
                            ),
                            input(
                                [
                                    r#type("text"),
                                    placeholder("Title"),
                                    value(&form.title),
                                    on_input(|event| Msg::TitleChanged(event.value())),
                                    class("shadow border rounded w-full py-2 px-3 text-gray-700"),
                                ],
                                [],
                            ),
                            match form.title_error {
                                Some(message) => p(
                                    [class("text-red-500 text-xs italic")],
                                    [text(message)],
                                ),
                                None => span([], []),
                            },
                        ],
                    ),
                    div(
                        [class("mb-4")],
                        [
                            label(
                                [class("block text-gray-700 text-sm font-bold mb-2")],
                                [text("Description")],
                            ),
                            textarea(
                                [
                                    placeholder("Description"),
                                    value(&form.description),
                                    on_input(|event| Msg::DescriptionChanged(event.value())),
                                    class("shadow border rounded w-full py-2 px-3 text-gray-700 h-20 resize-y"),
                                ],
                                [],
                            ),
                            match form.description_error {
                                Some(message) => p(
                                    [class("text-red-500 text-xs italic")],
                                    [text(message)],
                                ),
                                None => span([], []),
                            },
                        ],
                    ),
                    div(
                        [class("mb-4")],
                        [
                            input(
                                [
                                    r#type("checkbox"),
                                    checked(form.completed),
                                    on_click({
                                        let completed = form.completed;
                                        move |_| Msg::CompletedToggled(!completed)
                                    }),
                                    class("mr-2 leading-tight"),
                                ],
                                [],
                            ),
                            span(
                                [class("text-gray-700 text-sm")],
                                [text("Mark as Completed")],
                            ),
                        ],
                    ),
                    div(
                        [class("flex items-center gap-2")],
                        [
                            button(
                                [
                                    on_click(|_| Msg::Submit),
                                    disabled(self.saving),
                                    class("bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded disabled:opacity-50"),
                                ],
                                [if self.saving {
                                    text("Saving...")
                                } else if form.is_editing() {
                                    text("Update Task")
                                } else {
                                    text("Add Task")
                                }],
                            ),
                            button(
                                [
                                    on_click(|_| Msg::CloseForm),
                                    class("bg-gray-500 hover:bg-gray-600 text-white font-bold py-2 px-4 rounded"),
                                ],
                                [text("Close")],
                            ),
                        ],
                    ),
                ],
            )],
        )
    }
}

fn banner_timer(seq: u64) -> Cmd<Msg> {
    Cmd::new(async move {
        delay(BANNER_MS).await;
        Msg::BannerExpired(seq)
    })
}

async fn delay(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        window()
            .expect("no window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("setTimeout failed");
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
