//! Command-line argument definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::convert::Infallible;
use std::str::FromStr;
use taskdesk::lookup::LookupKind;
use taskdesk::registry::domain::Periodicity;
use taskdesk::views::ViewPreset;

/// Task tracking for companies, branches and recurring obligations.
#[derive(Parser, Debug)]
#[command(name = "taskdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print human-readable lines instead of JSON.
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database tables.
    Init,

    /// Company registry.
    Company {
        #[command(subcommand)]
        command: CompanyCommands,
    },

    /// Branch registry.
    Branch {
        #[command(subcommand)]
        command: BranchCommands,
    },

    /// Category registry.
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Subcategory registry.
    Subcategory {
        #[command(subcommand)]
        command: SubcategoryCommands,
    },

    /// User registry.
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Task lifecycle.
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Show a selection list with record ids.
    Options {
        /// Selection list to show.
        kind: KindArg,
    },

    /// Resolve a selection label to its record id.
    Resolve {
        /// Selection list to search.
        kind: KindArg,
        /// Exact label as shown by `options`.
        label: String,
    },

    /// Email alerts.
    Notify {
        /// Print the message instead of sending it.
        #[arg(long)]
        dry_run: bool,

        #[command(subcommand)]
        command: NotifyCommands,
    },
}

/// Company commands.
#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// Register a company.
    Add {
        /// Legal name.
        legal_name: String,
        /// Tax id, unique among companies.
        tax_id: String,
    },
    /// List companies.
    List,
}

/// Branch commands.
#[derive(Subcommand, Debug)]
pub enum BranchCommands {
    /// Register a branch.
    Add {
        /// Owning company, by `#id` or selection label.
        #[arg(long)]
        company: Selector,
        /// Tax id, unique among branches.
        tax_id: String,
        /// Municipality.
        municipality: String,
        /// State.
        state: String,
    },
    /// List branches.
    List,
}

/// Category commands.
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Register a category.
    Add {
        /// Unique category name.
        name: String,
    },
    /// List categories.
    List,
}

/// Subcategory commands.
#[derive(Subcommand, Debug)]
pub enum SubcategoryCommands {
    /// Register a subcategory.
    Add {
        /// Parent category, by `#id` or selection label.
        #[arg(long)]
        category: Selector,
        /// Subcategory name.
        name: String,
        /// Recurrence: monthly, quarterly, annual or one_off.
        periodicity: Periodicity,
    },
    /// List subcategories.
    List,
}

/// User commands.
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Register a user.
    Add {
        /// Display name.
        name: String,
        /// Unique email address.
        email: String,
    },
    /// List users.
    List,
}

/// Task commands.
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a pending task.
    Add {
        /// Task title.
        title: String,
        /// Due date (YYYY-MM-DD).
        due_date: NaiveDate,
        /// Branch, by `#id` or selection label.
        #[arg(long)]
        branch: Option<Selector>,
        /// Subcategory, by `#id` or selection label.
        #[arg(long)]
        subcategory: Option<Selector>,
    },
    /// Close a pending task.
    Close {
        /// Task, by `#id` or pending-task selection label.
        task: Selector,
    },
    /// List pending tasks by due date.
    Pending,
    /// List every task through a view.
    List {
        /// View to render.
        #[arg(long, value_enum, default_value_t = ViewArg::Spreadsheet)]
        view: ViewArg,
        /// Only tasks due on or after this date.
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Only tasks due on or before this date.
        #[arg(long)]
        until: Option<NaiveDate>,
    },
}

/// Notification commands.
#[derive(Subcommand, Debug)]
pub enum NotifyCommands {
    /// Send a free-form alert.
    Alert {
        /// Recipient address.
        recipient: String,
        /// Subject line.
        subject: String,
        /// Message body.
        body: String,
    },
    /// Send the pending task digest.
    Digest {
        /// Recipient address.
        recipient: String,
    },
}

/// A record named by `#id` or by selection label.
///
/// Ids carry a `#` prefix so that numeric labels stay labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Record id, written `#12`.
    Id(i64),
    /// Selection label.
    Label(String),
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let id = value
            .trim()
            .strip_prefix('#')
            .and_then(|digits| digits.parse::<i64>().ok());
        Ok(id.map_or_else(|| Self::Label(value.to_owned()), Self::Id))
    }
}

/// Selection lists exposed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// Companies.
    Company,
    /// Branches.
    Branch,
    /// Categories.
    Category,
    /// Subcategories.
    Subcategory,
    /// Users.
    User,
    /// Pending tasks.
    Task,
}

impl From<KindArg> for LookupKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Company => Self::Company,
            KindArg::Branch => Self::Branch,
            KindArg::Category => Self::Category,
            KindArg::Subcategory => Self::Subcategory,
            KindArg::User => Self::User,
            KindArg::Task => Self::PendingTask,
        }
    }
}

/// Task views exposed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewArg {
    /// Columns by status.
    Kanban,
    /// Title, competence and due date.
    Calendar,
    /// Title, creation time and due date.
    Timeline,
    /// Every column.
    Spreadsheet,
    /// Task counts per status.
    Chart,
}

impl ViewArg {
    /// Returns the column preset for tabular views.
    #[must_use]
    pub const fn preset(self) -> Option<ViewPreset> {
        match self {
            Self::Calendar => Some(ViewPreset::Calendar),
            Self::Timeline => Some(ViewPreset::Timeline),
            Self::Spreadsheet => Some(ViewPreset::Spreadsheet),
            Self::Kanban | Self::Chart => None,
        }
    }
}
