//! Command execution against the `SQLite` store.

use crate::cli::{
    BranchCommands, CategoryCommands, Commands, CompanyCommands, NotifyCommands, Selector,
    SubcategoryCommands, TaskCommands, UserCommands, ViewArg,
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use taskdesk::config::AppConfig;
use taskdesk::error::{AppError, AppResult};
use taskdesk::lookup::{LookupKind, LookupResolver, SelectionLabel, SelectionOption};
use taskdesk::notification::{
    adapters::{memory::RecordingNotifier, smtp::SmtpNotifier},
    ports::Notifier,
    services::NotificationService,
};
use taskdesk::registry::{
    domain::{BranchId, CategoryId, CompanyId, SubcategoryId},
    services::RegistrationService,
};
use taskdesk::storage::sqlite::{SqliteStore, apply_schema, build_pool, is_in_memory};
use taskdesk::task::{
    domain::{Task, TaskId},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use taskdesk::views::{due_within, group_by_status, status_counts};
use tracing::info;

/// Services bound to one opened database.
pub struct App {
    config: AppConfig,
    registry: RegistrationService<SqliteStore>,
    tasks: TaskLifecycleService<SqliteStore, DefaultClock>,
    lookup: LookupResolver<SqliteStore, SqliteStore>,
    output: Output,
}

impl App {
    /// Opens the configured database.
    ///
    /// In-memory databases start empty on every run, so their tables are
    /// created here.
    pub fn open(config: AppConfig, human: bool) -> AppResult<Self> {
        let pool = build_pool(&config.database.url, config.database.max_connections)?;
        if is_in_memory(&config.database.url) {
            apply_schema(&pool)?;
        }
        let store = Arc::new(SqliteStore::new(pool));
        Ok(Self {
            registry: RegistrationService::new(Arc::clone(&store)),
            tasks: TaskLifecycleService::new(Arc::clone(&store), Arc::new(DefaultClock)),
            lookup: LookupResolver::new(Arc::clone(&store), store),
            config,
            output: Output { human },
        })
    }

    /// Runs one command.
    pub async fn run(&self, command: Commands) -> AppResult<()> {
        match command {
            Commands::Init => self.init(),
            Commands::Company { command } => self.company(command).await,
            Commands::Branch { command } => self.branch(command).await,
            Commands::Category { command } => self.category(command).await,
            Commands::Subcategory { command } => self.subcategory(command).await,
            Commands::User { command } => self.user(command).await,
            Commands::Task { command } => self.task(command).await,
            Commands::Options { kind } => {
                let options = self.lookup.options(kind.into()).await?;
                self.output.emit(&options, || {
                    options.iter().map(|o| format!("{}\t{}", o.id.value(), o.label)).collect()
                })
            }
            Commands::Resolve { kind, label } => {
                let id = self.lookup.resolve(kind.into(), &label).await?;
                self.output.emit(&id, || vec![id.value().to_string()])
            }
            Commands::Notify { dry_run, command } => self.notify(dry_run, command).await,
        }
    }

    fn init(&self) -> AppResult<()> {
        if !is_in_memory(&self.config.database.url) {
            let pool = build_pool(&self.config.database.url, 1)?;
            apply_schema(&pool)?;
        }
        info!(database = %self.config.database.url, "database initialised");
        self.output.emit(&self.config.database.url, || {
            vec![format!("initialised {}", self.config.database.url)]
        })
    }

    async fn company(&self, command: CompanyCommands) -> AppResult<()> {
        match command {
            CompanyCommands::Add { legal_name, tax_id } => {
                let company = self.registry.register_company(&legal_name, &tax_id).await?;
                self.output.record(company.id.value(), &company)
            }
            CompanyCommands::List => {
                let companies = self.registry.companies().await?;
                self.output.records(&companies, |c| c.id.value())
            }
        }
    }

    async fn branch(&self, command: BranchCommands) -> AppResult<()> {
        match command {
            BranchCommands::Add {
                company,
                tax_id,
                municipality,
                state,
            } => {
                let company_id = self.company_id(company).await?;
                let branch = self
                    .registry
                    .register_branch(company_id, &tax_id, &municipality, &state)
                    .await?;
                self.output.record(branch.id.value(), &branch)
            }
            BranchCommands::List => {
                let branches = self.registry.branches().await?;
                self.output.records(&branches, |b| b.id.value())
            }
        }
    }

    async fn category(&self, command: CategoryCommands) -> AppResult<()> {
        match command {
            CategoryCommands::Add { name } => {
                let category = self.registry.register_category(&name).await?;
                self.output.record(category.id.value(), &category)
            }
            CategoryCommands::List => {
                let categories = self.registry.categories().await?;
                self.output.records(&categories, |c| c.id.value())
            }
        }
    }

    async fn subcategory(&self, command: SubcategoryCommands) -> AppResult<()> {
        match command {
            SubcategoryCommands::Add {
                category,
                name,
                periodicity,
            } => {
                let category_id = self.category_id(category).await?;
                let subcategory = self
                    .registry
                    .register_subcategory(category_id, &name, periodicity)
                    .await?;
                self.output.record(subcategory.id.value(), &subcategory)
            }
            SubcategoryCommands::List => {
                let subcategories = self.registry.subcategories().await?;
                self.output.records(&subcategories, |s| s.id.value())
            }
        }
    }

    async fn user(&self, command: UserCommands) -> AppResult<()> {
        match command {
            UserCommands::Add { name, email } => {
                let user = self.registry.register_user(&name, &email).await?;
                self.output.record(user.id.value(), &user)
            }
            UserCommands::List => {
                let users = self.registry.users().await?;
                self.output.records(&users, |u| u.id.value())
            }
        }
    }

    async fn task(&self, command: TaskCommands) -> AppResult<()> {
        match command {
            TaskCommands::Add {
                title,
                due_date,
                branch,
                subcategory,
            } => {
                let mut request = CreateTaskRequest::new(title, due_date);
                if let Some(selector) = branch {
                    request = request.with_branch(self.branch_id(selector).await?);
                }
                if let Some(selector) = subcategory {
                    request = request.with_subcategory(self.subcategory_id(selector).await?);
                }
                let task = self.tasks.create_task(request).await?;
                self.output.emit(&task, || vec![task_line(&task)])
            }
            TaskCommands::Close { task } => {
                let task_id = self.task_id(task).await?;
                let closed = self.tasks.close_task(task_id).await?;
                self.output.emit(&closed, || vec![task_line(&closed)])
            }
            TaskCommands::Pending => {
                let options = self.lookup.options(LookupKind::PendingTask).await?;
                self.output.emit(&options, || {
                    options.iter().map(|o| format!("{}\t{}", o.id.value(), o.label)).collect()
                })
            }
            TaskCommands::List { view, from, until } => {
                let all = self.tasks.list_tasks().await?;
                let range = from.unwrap_or(NaiveDate::MIN)..=until.unwrap_or(NaiveDate::MAX);
                let selected: Vec<Task> = due_within(&all, &range).into_iter().cloned().collect();
                self.render_view(view, &selected)
            }
        }
    }

    fn render_view(&self, view: ViewArg, tasks: &[Task]) -> AppResult<()> {
        if let Some(preset) = view.preset() {
            let rows = preset.project(tasks);
            return self.output.emit(&rows, || {
                rows.iter()
                    .map(|row| {
                        row.fields()
                            .iter()
                            .map(|(_, value)| value.to_string())
                            .collect::<Vec<_>>()
                            .join("\t")
                    })
                    .collect()
            });
        }
        if view == ViewArg::Chart {
            let counts = status_counts(tasks);
            return self.output.emit(&counts, || {
                counts.iter().map(|(status, count)| format!("{status}\t{count}")).collect()
            });
        }
        let columns = group_by_status(tasks);
        self.output.emit(&columns, || {
            columns
                .iter()
                .flat_map(|(status, cards)| {
                    std::iter::once(format!("[{status}]"))
                        .chain(cards.iter().map(|task| format!("  {}", task_line(task))))
                })
                .collect()
        })
    }

    async fn notify(&self, dry_run: bool, command: NotifyCommands) -> AppResult<()> {
        if dry_run {
            let recorder = Arc::new(RecordingNotifier::new());
            self.send(Arc::clone(&recorder), command).await?;
            let sent = recorder.sent()?;
            return self.output.emit(&sent, || {
                sent.iter()
                    .map(|m| format!("To: {}\nSubject: {}\n\n{}", m.recipient, m.subject, m.body))
                    .collect()
            });
        }

        let smtp = self.config.smtp.as_ref().ok_or_else(|| {
            AppError::Unavailable("email is not configured; set TASKDESK_SMTP_HOST".to_owned())
        })?;
        let notifier = Arc::new(SmtpNotifier::new(smtp)?);
        let summary = self.send(notifier, command).await?;
        self.output.emit(&summary, || vec![summary.clone()])
    }

    async fn send<N: Notifier>(
        &self,
        notifier: Arc<N>,
        command: NotifyCommands,
    ) -> AppResult<String> {
        let service = NotificationService::new(notifier, self.lookup.clone());
        match command {
            NotifyCommands::Alert {
                recipient,
                subject,
                body,
            } => {
                service.send_alert(&recipient, &subject, &body).await?;
                Ok(format!("alert sent to {recipient}"))
            }
            NotifyCommands::Digest { recipient } => {
                let listed = service.send_pending_digest(&recipient).await?;
                Ok(format!("digest of {listed} pending task(s) sent to {recipient}"))
            }
        }
    }

    async fn company_id(&self, selector: Selector) -> AppResult<CompanyId> {
        Ok(match selector {
            Selector::Id(id) => CompanyId::new(id),
            Selector::Label(label) => self.lookup.resolve_company(&label).await?,
        })
    }

    async fn branch_id(&self, selector: Selector) -> AppResult<BranchId> {
        Ok(match selector {
            Selector::Id(id) => BranchId::new(id),
            Selector::Label(label) => self.lookup.resolve_branch(&label).await?,
        })
    }

    async fn category_id(&self, selector: Selector) -> AppResult<CategoryId> {
        Ok(match selector {
            Selector::Id(id) => CategoryId::new(id),
            Selector::Label(label) => self.lookup.resolve_category(&label).await?,
        })
    }

    async fn subcategory_id(&self, selector: Selector) -> AppResult<SubcategoryId> {
        Ok(match selector {
            Selector::Id(id) => SubcategoryId::new(id),
            Selector::Label(label) => self.lookup.resolve_subcategory(&label).await?,
        })
    }

    async fn task_id(&self, selector: Selector) -> AppResult<TaskId> {
        Ok(match selector {
            Selector::Id(id) => TaskId::new(id),
            Selector::Label(label) => self.lookup.resolve_pending_task(&label).await?,
        })
    }
}

fn task_line(task: &Task) -> String {
    format!(
        "{}\t[{}]\t{}\t{}",
        task.id(),
        task.status(),
        task.title(),
        task.due_date().format("%Y-%m-%d")
    )
}

/// Writes command results as JSON or as tab-separated lines.
struct Output {
    human: bool,
}

impl Output {
    fn emit<T: Serialize + ?Sized>(
        &self,
        value: &T,
        lines: impl FnOnce() -> Vec<String>,
    ) -> AppResult<()> {
        let mut stdout = io::stdout().lock();
        let written = if self.human {
            lines()
                .iter()
                .try_for_each(|line| writeln!(stdout, "{line}"))
        } else {
            let json = serde_json::to_string_pretty(value)
                .map_err(|err| AppError::Unavailable(format!("cannot render output: {err}")))?;
            writeln!(stdout, "{json}")
        };
        written.map_err(|err| AppError::Unavailable(format!("cannot write output: {err}")))
    }

    fn record<T: Serialize + SelectionLabel>(&self, id: i64, record: &T) -> AppResult<()> {
        self.emit(record, || vec![format!("{id}\t{}", record.selection_label())])
    }

    fn records<T: Serialize + SelectionLabel>(
        &self,
        records: &[T],
        id: impl Fn(&T) -> i64,
    ) -> AppResult<()> {
        let options: Vec<SelectionOption<i64>> = records
            .iter()
            .map(|record| SelectionOption::new(id(record), record))
            .collect();
        self.emit(records, || {
            options.iter().map(|o| format!("{}\t{}", o.id, o.label)).collect()
        })
    }
}
