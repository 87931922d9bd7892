use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use quaestor_data::{
    Delete,
    Event,
    EventFilter,
    Insert,
    Query,
    Retrieve,
    Update,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Event> for Connection {
    type Filter = EventFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Event>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                title,
                description,
                date,
                location,
                organizer_id,
                status
            FROM events
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(title) = filter.title.clone() {
            qry.push(" AND title LIKE ").push_bind(format!("%{}%", title));
        }
        if let Some(organizer_id) = filter.organizer_id {
            qry.push(" AND organizer_id = ").push_bind(organizer_id);
        }
        if let Some(status) = filter.status {
            qry.push(" AND status = ").push_bind(status);
        }

        let events: Vec<Event> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(events)
    }
}

#[async_trait]
impl Retrieve<Event> for Connection {
    type Key = u32;
    async fn retrieve(&self, event_id: Self::Key) -> Result<Event> {
        let filter = EventFilter {
            id: Some(event_id),
            ..Default::default()
        };
        let event = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(event)
    }
}

#[async_trait]
impl Insert<Event> for Connection {
    async fn insert(&self, event: Event) -> Result<Event> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO events (
                    title,
                    description,
                    date,
                    location,
                    organizer_id,
                    status
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&event.title)
                .push_bind(&event.description)
                .push_bind(event.date)
                .push_bind(&event.location)
                .push_bind(event.organizer_id)
                .push_bind(event.status);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Event> for Connection {
    async fn update(&self, event: Event) -> Result<Event> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE events SET")
                .push(" title = ")
                .push_bind(&event.title)
                .push(", description = ")
                .push_bind(&event.description)
                .push(", date = ")
                .push_bind(event.date)
                .push(", location = ")
                .push_bind(&event.location)
                .push(", organizer_id = ")
                .push_bind(event.organizer_id)
                .push(", status = ")
                .push_bind(event.status)
                .push(" WHERE id = ")
                .push_bind(event.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(event.id).await
    }
}

#[async_trait]
impl Delete<Event> for Connection {
    async fn delete(&self, event: Event) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM events WHERE id = ")
            .push_bind(event.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use quaestor_data::{EventStatus, Member};

    use crate::connection;

    #[tokio::test]
    async fn test_event_roundtrip() {
        let (_handle, conn) = connection::open_test().await;

        let organizer = conn
            .insert(Member {
                name: "Ada".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let event = conn
            .insert(Event {
                title: "Winter colloquium".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 12, 6).unwrap(),
                location: "Lecture hall 3".to_string(),
                organizer_id: organizer.id,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(event.id > 0);
        assert_eq!(event.status, EventStatus::Planned);

        let mut event: Event = conn.retrieve(event.id).await.unwrap();
        event.status = EventStatus::Completed;
        let event = conn.update(event).await.unwrap();
        assert_eq!(event.status, EventStatus::Completed);

        let events: Vec<Event> = conn
            .query(&EventFilter {
                status: Some(EventStatus::Completed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
    }
}
