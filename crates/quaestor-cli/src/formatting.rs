use quaestor_data::{
    Contribution,
    ContributionTarget,
    EntityRef,
    Event,
    Member,
    Project,
    Task,
    Transaction,
};
use quaestor_finance::{BalancePoint, EntityFinancialSummary, FinancialReport};

macro_rules! next_attr {
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

fn related_label(related: Option<EntityRef>) -> String {
    match related {
        Some(entity) => format!("{} #{}", entity.kind(), entity.id()),
        None => "-".to_string(),
    }
}

fn target_label(target: ContributionTarget) -> String {
    match target.id() {
        Some(id) => format!("{} #{}", target.kind(), id),
        None => target.kind().to_string(),
    }
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        println!("Name:\t\t{}", self.name);
        println!("Email:\t\t{}", self.email);
        println!("Role:\t\t{}", self.role.as_str());
        println!("Joined:\t\t{}", self.joined_at);
        println!("Notes:\t\t{}", self.notes);
    }
}

impl PrintFormatted for (Member, Member) {
    fn print_formatted(&self) {
        let (old, new) = self;
        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t{}{}", old.name, next_name);
        let next_email = next_attr!(old, new, email);
        println!("Email:\t\t{}{}", old.email, next_email);
        let next_role = if old.role != new.role {
            format!(" -> {}", new.role.as_str())
        } else {
            "".to_string()
        };
        println!("Role:\t\t{}{}", old.role.as_str(), next_role);
        let next_joined = next_attr!(old, new, joined_at);
        println!("Joined:\t\t{}{}", old.joined_at, next_joined);
        let next_notes = next_attr!(old, new, notes);
        println!("Notes:\t\t{}{}", old.notes, next_notes);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:<30}\t{:<8}\t{:<12}\t{}",
            "ID", "Name", "Email", "Role", "Joined", "Notes"
        );
        println!("{:-<120}", "-");
        for member in self {
            println!(
                "{:>4}\t{:<24}\t{:<30}\t{:<8}\t{:<12}\t{}",
                member.id,
                member.name,
                member.email,
                member.role.as_str(),
                member.joined_at.to_string(),
                member.notes
            );
        }
    }
}

impl PrintFormatted for Event {
    fn print_formatted(&self) {
        println!("Title:\t\t{}", self.title);
        println!("Date:\t\t{}", self.date);
        println!("Location:\t{}", self.location);
        println!("Organizer:\t{}", self.organizer_id);
        println!("Status:\t\t{}", self.status.as_str());
        println!("Description:\t{}", self.description);
    }
}

impl PrintFormatted for Vec<Event> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<30}\t{:<12}\t{:<20}\t{:<10}\t{}",
            "ID", "Title", "Date", "Location", "Organizer", "Status"
        );
        println!("{:-<120}", "-");
        for event in self {
            println!(
                "{:>4}\t{:<30}\t{:<12}\t{:<20}\t{:>10}\t{}",
                event.id,
                event.title,
                event.date.to_string(),
                event.location,
                event.organizer_id,
                event.status.as_str()
            );
        }
    }
}

impl PrintFormatted for Project {
    fn print_formatted(&self) {
        let end_date = match self.end_date {
            Some(end) => end.to_string(),
            None => "None".to_string(),
        };
        println!("Title:\t\t{}", self.title);
        println!("Start:\t\t{}", self.start_date);
        println!("End:\t\t{}", end_date);
        println!("Manager:\t{}", self.manager_id);
        println!("Status:\t\t{}", self.status.as_str());
        println!("Description:\t{}", self.description);
    }
}

impl PrintFormatted for Vec<Project> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<30}\t{:<12}\t{:<12}\t{:<8}\t{}",
            "ID", "Title", "Start", "End", "Manager", "Status"
        );
        println!("{:-<120}", "-");
        for project in self {
            let end_date = match project.end_date {
                Some(end) => end.to_string(),
                None => "None".to_string(),
            };
            println!(
                "{:>4}\t{:<30}\t{:<12}\t{:<12}\t{:>8}\t{}",
                project.id,
                project.title,
                project.start_date.to_string(),
                end_date,
                project.manager_id,
                project.status.as_str()
            );
        }
    }
}

impl PrintFormatted for Task {
    fn print_formatted(&self) {
        println!("Title:\t\t{}", self.title);
        println!("Due:\t\t{}", self.due_date);
        println!("Assigned:\t{}", self.assigned_to);
        println!("Status:\t\t{}", self.status.as_str());
        println!("Priority:\t{}", self.priority.as_str());
        println!("Related:\t{}", related_label(Some(self.related_to)));
        println!("Description:\t{}", self.description);
    }
}

impl PrintFormatted for Vec<Task> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<30}\t{:<12}\t{:<8}\t{:<12}\t{:<8}\t{}",
            "ID", "Title", "Due", "Assigned", "Status", "Priority", "Related"
        );
        println!("{:-<120}", "-");
        for task in self {
            println!(
                "{:>4}\t{:<30}\t{:<12}\t{:>8}\t{:<12}\t{:<8}\t{}",
                task.id,
                task.title,
                task.due_date.to_string(),
                task.assigned_to,
                task.status.as_str(),
                task.priority.as_str(),
                related_label(Some(task.related_to))
            );
        }
    }
}

impl PrintFormatted for Vec<Transaction> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<12}\t{:<12}\t{:>12}\t{:<14}\t{}",
            "ID", "Date", "Kind", "Amount", "Related", "Description"
        );
        println!("{:-<120}", "-");
        for tx in self {
            println!(
                "{:>4}\t{:<12}\t{:<12}\t{:>12}\t{:<14}\t{}",
                tx.id,
                tx.date.to_string(),
                tx.kind.as_str(),
                tx.amount.to_string(),
                related_label(tx.related_to),
                tx.description
            );
        }
    }
}

impl PrintFormatted for Vec<Contribution> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<12}\t{:>12}\t{:>12}\t{:<16}\t{}",
            "ID", "Date", "Contributor", "Amount", "Target", "Description"
        );
        println!("{:-<120}", "-");
        for contribution in self {
            println!(
                "{:>4}\t{:<12}\t{:>12}\t{:>12}\t{:<16}\t{}",
                contribution.id,
                contribution.date.to_string(),
                contribution.contributor_id,
                contribution.amount.to_string(),
                target_label(contribution.target),
                contribution.description
            );
        }
    }
}

impl PrintFormatted for FinancialReport {
    fn print_formatted(&self) {
        println!("Period:\t\t\t{} - {}", self.start_date, self.end_date);
        println!("Initial balance:\t{}", self.initial_balance);
        println!("Total deposits:\t\t{}", self.total_deposits);
        println!("Total withdrawals:\t{}", self.total_withdrawals);
        println!("Final balance:\t\t{}", self.final_balance);

        if !self.deposits.is_empty() {
            println!("\nDeposits:");
            self.deposits.print_formatted();
        }
        if !self.withdrawals.is_empty() {
            println!("\nWithdrawals:");
            self.withdrawals.print_formatted();
        }
    }
}

impl PrintFormatted for EntityFinancialSummary {
    fn print_formatted(&self) {
        println!("Target:\t\t\t{}", target_label(self.target));
        println!("Total income:\t\t{}", self.total_income);
        println!("Total expenses:\t\t{}", self.total_expenses);
        println!("Balance:\t\t{}", self.balance);

        if !self.transactions.is_empty() {
            println!("\nTransactions:");
            self.transactions.print_formatted();
        }
        if !self.contributions.is_empty() {
            println!("\nContributions:");
            self.contributions.print_formatted();
        }
    }
}

impl PrintFormatted for Vec<BalancePoint> {
    fn print_formatted(&self) {
        println!("{:<12}\t{:>12}", "Date", "Balance");
        println!("{:-<26}", "-");
        for point in self {
            println!(
                "{:<12}\t{:>12}",
                point.date.to_string(),
                point.balance.to_string()
            );
        }
    }
}
