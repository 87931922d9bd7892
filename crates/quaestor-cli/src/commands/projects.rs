use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use quaestor_data::{
    Delete,
    Insert,
    Member,
    Project,
    ProjectFilter,
    ProjectStatus,
    Query,
    Retrieve,
    Update,
};
use quaestor_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Projects {
    /// Show a project and its tasks
    #[clap(name = "show")]
    Show(ShowProject),
    /// List projects
    #[clap(name = "list")]
    List(ListProjects),
    /// Add a project
    #[clap(name = "add")]
    Add(AddProject),
    /// Update a project
    #[clap(name = "set")]
    Update(UpdateProject),
    /// Delete a project
    #[clap(name = "delete")]
    Delete(DeleteProject),
}

impl Projects {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Projects::Show(cmd) => cmd.run(db).await,
            Projects::List(cmd) => cmd.run(db).await,
            Projects::Add(cmd) => cmd.run(db).await,
            Projects::Update(cmd) => cmd.run(db).await,
            Projects::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowProject {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowProject {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let project: Project = db.retrieve(self.id).await?;
        println!();
        project.print_formatted();

        let tasks = project.get_tasks(db).await?;
        if !tasks.is_empty() {
            println!("\nTasks:");
            tasks.print_formatted();
        }
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListProjects {
    #[clap(short, long)]
    pub id: Option<u32>,
    #[clap(short, long)]
    pub title: Option<String>,
    #[clap(short, long)]
    pub manager: Option<u32>,
    #[clap(short, long)]
    pub status: Option<String>,
}

impl ListProjects {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let status = match self.status {
            Some(status) => Some(
                ProjectStatus::from_str(&status)
                    .ok_or_else(|| anyhow!("unknown status: {}", status))?,
            ),
            None => None,
        };
        let filter = ProjectFilter {
            id: self.id,
            title: self.title,
            manager_id: self.manager,
            status,
        };

        let projects: Vec<Project> = db.query(&filter).await?;
        println!("{} projects.", projects.len());
        projects.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddProject {
    #[clap(short, long)]
    pub title: String,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(long)]
    pub start_date: Option<NaiveDate>,
    #[clap(long)]
    pub end_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub manager: u32,
}

impl AddProject {
    pub async fn run(self, db: &Connection) -> Result<()> {
        // The manager has to exist
        let manager: Member = db.retrieve(self.manager).await?;
        let start_date = self
            .start_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let project = Project {
            title: self.title,
            description: self.description.unwrap_or_default(),
            start_date,
            end_date: self.end_date,
            manager_id: manager.id,
            ..Default::default()
        };

        println!();
        project.print_formatted();
        println!();

        let confirm = Confirm::new("Add project?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let project = db.insert(project).await?;
        println!("Project added with id {}.", project.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateProject {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub title: Option<String>,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(long)]
    pub start_date: Option<NaiveDate>,
    #[clap(long)]
    pub end_date: Option<NaiveDate>,
    #[clap(short, long)]
    pub manager: Option<u32>,
    #[clap(short, long)]
    pub status: Option<String>,
}

impl UpdateProject {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let project: Project = db.retrieve(self.id).await?;
        let mut update = project;

        if let Some(title) = self.title {
            update.title = title;
        }
        if let Some(description) = self.description {
            update.description = description;
        }
        if let Some(start_date) = self.start_date {
            update.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            update.end_date = Some(end_date);
        }
        if let Some(manager) = self.manager {
            let manager: Member = db.retrieve(manager).await?;
            update.manager_id = manager.id;
        }
        if let Some(status) = self.status {
            update.status = ProjectStatus::from_str(&status)
                .ok_or_else(|| anyhow!("unknown status: {}", status))?;
        }

        let project = db.update(update).await?;
        println!();
        project.print_formatted();
        println!();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteProject {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteProject {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let project: Project = db.retrieve(self.id).await?;
        println!();
        project.print_formatted();
        println!();
        let confirm =
            Confirm::new("Delete project from database?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(project).await?;
        Ok(())
    }
}
