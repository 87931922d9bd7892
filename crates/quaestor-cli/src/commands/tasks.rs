use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use quaestor_data::{
    Delete,
    EntityRef,
    Insert,
    Member,
    Query,
    Retrieve,
    Task,
    TaskFilter,
    TaskPriority,
    TaskStatus,
    Update,
};
use quaestor_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Tasks {
    /// Show a task
    #[clap(name = "show")]
    Show(ShowTask),
    /// List tasks
    #[clap(name = "list")]
    List(ListTasks),
    /// Add a task
    #[clap(name = "add")]
    Add(AddTask),
    /// Update a task
    #[clap(name = "set")]
    Update(UpdateTask),
    /// Delete a task
    #[clap(name = "delete")]
    Delete(DeleteTask),
}

impl Tasks {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Tasks::Show(cmd) => cmd.run(db).await,
            Tasks::List(cmd) => cmd.run(db).await,
            Tasks::Add(cmd) => cmd.run(db).await,
            Tasks::Update(cmd) => cmd.run(db).await,
            Tasks::Delete(cmd) => cmd.run(db).await,
        }
    }
}

/// Resolve the --event / --project flag pair into an entity reference.
fn parse_related(event: Option<u32>, project: Option<u32>) -> Result<EntityRef> {
    match (event, project) {
        (Some(id), None) => Ok(EntityRef::Event(id)),
        (None, Some(id)) => Ok(EntityRef::Project(id)),
        _ => Err(anyhow!("pass exactly one of --event or --project")),
    }
}

#[derive(Args, Debug)]
pub struct ShowTask {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowTask {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let task: Task = db.retrieve(self.id).await?;
        println!();
        task.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListTasks {
    #[clap(short, long)]
    pub id: Option<u32>,
    #[clap(short, long)]
    pub assigned_to: Option<u32>,
    #[clap(short, long)]
    pub status: Option<String>,
    #[clap(long, conflicts_with = "project")]
    pub event: Option<u32>,
    #[clap(long)]
    pub project: Option<u32>,
}

impl ListTasks {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let status = match self.status {
            Some(status) => Some(
                TaskStatus::from_str(&status)
                    .ok_or_else(|| anyhow!("unknown status: {}", status))?,
            ),
            None => None,
        };
        let related_to = match (self.event, self.project) {
            (None, None) => None,
            (event, project) => Some(parse_related(event, project)?),
        };
        let filter = TaskFilter {
            id: self.id,
            assigned_to: self.assigned_to,
            status,
            related_to,
        };

        let tasks: Vec<Task> = db.query(&filter).await?;
        println!("{} tasks.", tasks.len());
        tasks.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddTask {
    #[clap(short, long)]
    pub title: String,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(long)]
    pub due_date: NaiveDate,
    #[clap(short, long)]
    pub assigned_to: u32,
    #[clap(short = 'r', long, default_value = "medium")]
    pub priority: String,
    #[clap(long, conflicts_with = "project")]
    pub event: Option<u32>,
    #[clap(long)]
    pub project: Option<u32>,
}

impl AddTask {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let priority = TaskPriority::from_str(&self.priority)
            .ok_or_else(|| anyhow!("unknown priority: {}", self.priority))?;
        let related_to = parse_related(self.event, self.project)?;

        // The assignee has to exist
        let assignee: Member = db.retrieve(self.assigned_to).await?;

        let task = Task {
            id: 0,
            title: self.title,
            description: self.description.unwrap_or_default(),
            due_date: self.due_date,
            assigned_to: assignee.id,
            status: TaskStatus::Pending,
            priority,
            related_to,
        };

        println!();
        task.print_formatted();
        println!();

        let confirm = Confirm::new("Add task?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let task = db.insert(task).await?;
        println!("Task added with id {}.", task.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateTask {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub title: Option<String>,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(long)]
    pub due_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub assigned_to: Option<u32>,
    #[clap(short, long)]
    pub status: Option<String>,
    #[clap(short = 'r', long)]
    pub priority: Option<String>,
}

impl UpdateTask {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let task: Task = db.retrieve(self.id).await?;
        let mut update = task;

        if let Some(title) = self.title {
            update.title = title;
        }
        if let Some(description) = self.description {
            update.description = description;
        }
        if let Some(due_date) = self.due_date {
            update.due_date = due_date;
        }
        if let Some(assigned_to) = self.assigned_to {
            let assignee: Member = db.retrieve(assigned_to).await?;
            update.assigned_to = assignee.id;
        }
        if let Some(status) = self.status {
            update.status = TaskStatus::from_str(&status)
                .ok_or_else(|| anyhow!("unknown status: {}", status))?;
        }
        if let Some(priority) = self.priority {
            update.priority = TaskPriority::from_str(&priority)
                .ok_or_else(|| anyhow!("unknown priority: {}", priority))?;
        }

        let task = db.update(update).await?;
        println!();
        task.print_formatted();
        println!();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteTask {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteTask {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let task: Task = db.retrieve(self.id).await?;
        println!();
        task.print_formatted();
        println!();
        let confirm = Confirm::new("Delete task from database?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(task).await?;
        Ok(())
    }
}
