use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use quaestor_data::{
    Delete,
    EntityRef,
    Insert,
    Query,
    Retrieve,
    Task,
    TaskFilter,
    TaskPriority,
    TaskStatus,
    Update,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

/// Raw task row. The related entity is stored as a kind and id
/// column pair and folded into an EntityRef on read.
#[derive(Debug, Clone, FromRow)]
struct TaskRow {
    id: u32,
    title: String,
    description: String,
    due_date: NaiveDate,
    assigned_to: u32,
    status: TaskStatus,
    priority: TaskPriority,
    related_kind: String,
    related_id: u32,
}

impl TryFrom<TaskRow> for Task {
    type Error = QueryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let related_to = EntityRef::from_parts(&row.related_kind, row.related_id)
            .ok_or_else(|| {
                QueryError::Malformed(format!("related kind: {}", row.related_kind))
            })?;
        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            assigned_to: row.assigned_to,
            status: row.status,
            priority: row.priority,
            related_to,
        })
    }
}

#[async_trait]
impl Query<Task> for Connection {
    type Filter = TaskFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Task>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                title,
                description,
                due_date,
                assigned_to,
                status,
                priority,
                related_kind,
                related_id
            FROM tasks
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(assigned_to) = filter.assigned_to {
            qry.push(" AND assigned_to = ").push_bind(assigned_to);
        }
        if let Some(status) = filter.status {
            qry.push(" AND status = ").push_bind(status);
        }
        if let Some(related_to) = filter.related_to {
            qry.push(" AND related_kind = ").push_bind(related_to.kind());
            qry.push(" AND related_id = ").push_bind(related_to.id());
        }

        let rows: Vec<TaskRow> = qry.build_query_as().fetch_all(&mut *conn).await?;
        let tasks = rows
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }
}

#[async_trait]
impl Retrieve<Task> for Connection {
    type Key = u32;
    async fn retrieve(&self, task_id: Self::Key) -> Result<Task> {
        let filter = TaskFilter {
            id: Some(task_id),
            ..Default::default()
        };
        let task = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(task)
    }
}

#[async_trait]
impl Insert<Task> for Connection {
    async fn insert(&self, task: Task) -> Result<Task> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO tasks (
                    title,
                    description,
                    due_date,
                    assigned_to,
                    status,
                    priority,
                    related_kind,
                    related_id
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&task.title)
                .push_bind(&task.description)
                .push_bind(task.due_date)
                .push_bind(task.assigned_to)
                .push_bind(task.status)
                .push_bind(task.priority)
                .push_bind(task.related_to.kind())
                .push_bind(task.related_to.id());

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Task> for Connection {
    async fn update(&self, task: Task) -> Result<Task> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE tasks SET")
                .push(" title = ")
                .push_bind(&task.title)
                .push(", description = ")
                .push_bind(&task.description)
                .push(", due_date = ")
                .push_bind(task.due_date)
                .push(", assigned_to = ")
                .push_bind(task.assigned_to)
                .push(", status = ")
                .push_bind(task.status)
                .push(", priority = ")
                .push_bind(task.priority)
                .push(", related_kind = ")
                .push_bind(task.related_to.kind())
                .push(", related_id = ")
                .push_bind(task.related_to.id())
                .push(" WHERE id = ")
                .push_bind(task.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(task.id).await
    }
}

#[async_trait]
impl Delete<Task> for Connection {
    async fn delete(&self, task: Task) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM tasks WHERE id = ")
            .push_bind(task.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quaestor_data::Member;

    use crate::connection;

    fn task(assigned_to: u32, related_to: EntityRef) -> Task {
        Task {
            id: 0,
            title: "book the room".to_string(),
            description: "".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            assigned_to,
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            related_to,
        }
    }

    #[tokio::test]
    async fn test_task_roundtrip() {
        let (_handle, conn) = connection::open_test().await;

        let member = conn
            .insert(Member {
                name: "Ada".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let task = conn
            .insert(task(member.id, EntityRef::Event(1)))
            .await
            .unwrap();
        assert!(task.id > 0);
        assert_eq!(task.related_to, EntityRef::Event(1));

        let mut task: Task = conn.retrieve(task.id).await.unwrap();
        task.status = TaskStatus::Completed;
        let task = conn.update(task).await.unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_task_query_by_related_entity() {
        let (_handle, conn) = connection::open_test().await;

        let member = conn
            .insert(Member {
                name: "Ada".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        conn.insert(task(member.id, EntityRef::Event(1))).await.unwrap();
        conn.insert(task(member.id, EntityRef::Project(1))).await.unwrap();
        conn.insert(task(member.id, EntityRef::Event(2))).await.unwrap();

        let tasks: Vec<Task> = conn
            .query(&TaskFilter {
                related_to: Some(EntityRef::Event(1)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].related_to, EntityRef::Event(1));
    }
}
