use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use quaestor_data::{
    Delete,
    Event,
    EventFilter,
    EventStatus,
    Insert,
    Member,
    Query,
    Retrieve,
    Update,
};
use quaestor_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Events {
    /// Show an event and its tasks
    #[clap(name = "show")]
    Show(ShowEvent),
    /// List events
    #[clap(name = "list")]
    List(ListEvents),
    /// Add an event
    #[clap(name = "add")]
    Add(AddEvent),
    /// Update an event
    #[clap(name = "set")]
    Update(UpdateEvent),
    /// Delete an event
    #[clap(name = "delete")]
    Delete(DeleteEvent),
}

impl Events {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Events::Show(cmd) => cmd.run(db).await,
            Events::List(cmd) => cmd.run(db).await,
            Events::Add(cmd) => cmd.run(db).await,
            Events::Update(cmd) => cmd.run(db).await,
            Events::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowEvent {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowEvent {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let event: Event = db.retrieve(self.id).await?;
        println!();
        event.print_formatted();

        let tasks = event.get_tasks(db).await?;
        if !tasks.is_empty() {
            println!("\nTasks:");
            tasks.print_formatted();
        }
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListEvents {
    #[clap(short, long)]
    pub id: Option<u32>,
    #[clap(short, long)]
    pub title: Option<String>,
    #[clap(short, long)]
    pub organizer: Option<u32>,
    #[clap(short, long)]
    pub status: Option<String>,
}

impl ListEvents {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let status = match self.status {
            Some(status) => Some(
                EventStatus::from_str(&status)
                    .ok_or_else(|| anyhow!("unknown status: {}", status))?,
            ),
            None => None,
        };
        let filter = EventFilter {
            id: self.id,
            title: self.title,
            organizer_id: self.organizer,
            status,
        };

        let events: Vec<Event> = db.query(&filter).await?;
        println!("{} events.", events.len());
        events.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddEvent {
    #[clap(short, long)]
    pub title: String,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(long)]
    pub date: NaiveDate,
    #[clap(short, long)]
    pub location: Option<String>,
    #[clap(short, long)]
    pub organizer: u32,
}

impl AddEvent {
    pub async fn run(self, db: &Connection) -> Result<()> {
        // The organizer has to exist
        let organizer: Member = db.retrieve(self.organizer).await?;

        let event = Event {
            title: self.title,
            description: self.description.unwrap_or_default(),
            date: self.date,
            location: self.location.unwrap_or_default(),
            organizer_id: organizer.id,
            ..Default::default()
        };

        println!();
        event.print_formatted();
        println!();

        let confirm = Confirm::new("Add event?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let event = db.insert(event).await?;
        println!("Event added with id {}.", event.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateEvent {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub title: Option<String>,
    #[clap(short, long)]
    pub description: Option<String>,
    #[clap(long)]
    pub date: Option<NaiveDate>,
    #[clap(short, long)]
    pub location: Option<String>,
    #[clap(short, long)]
    pub organizer: Option<u32>,
    #[clap(short, long)]
    pub status: Option<String>,
}

impl UpdateEvent {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let event: Event = db.retrieve(self.id).await?;
        let mut update = event;

        if let Some(title) = self.title {
            update.title = title;
        }
        if let Some(description) = self.description {
            update.description = description;
        }
        if let Some(date) = self.date {
            update.date = date;
        }
        if let Some(location) = self.location {
            update.location = location;
        }
        if let Some(organizer) = self.organizer {
            let organizer: Member = db.retrieve(organizer).await?;
            update.organizer_id = organizer.id;
        }
        if let Some(status) = self.status {
            update.status = EventStatus::from_str(&status)
                .ok_or_else(|| anyhow!("unknown status: {}", status))?;
        }

        let event = db.update(update).await?;
        println!();
        event.print_formatted();
        println!();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteEvent {
    #[clap(short, long)]
    pub id: u32,
}

impl DeleteEvent {
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let event: Event = db.retrieve(self.id).await?;
        println!();
        event.print_formatted();
        println!();
        let confirm = Confirm::new("Delete event from database?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(event).await?;
        Ok(())
    }
}
