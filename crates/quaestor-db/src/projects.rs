use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use quaestor_data::{
    Delete,
    Insert,
    Project,
    ProjectFilter,
    Query,
    Retrieve,
    Update,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Project> for Connection {
    type Filter = ProjectFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Project>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                title,
                description,
                start_date,
                end_date,
                manager_id,
                status
            FROM projects
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(title) = filter.title.clone() {
            qry.push(" AND title LIKE ").push_bind(format!("%{}%", title));
        }
        if let Some(manager_id) = filter.manager_id {
            qry.push(" AND manager_id = ").push_bind(manager_id);
        }
        if let Some(status) = filter.status {
            qry.push(" AND status = ").push_bind(status);
        }

        let projects: Vec<Project> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(projects)
    }
}

#[async_trait]
impl Retrieve<Project> for Connection {
    type Key = u32;
    async fn retrieve(&self, project_id: Self::Key) -> Result<Project> {
        let filter = ProjectFilter {
            id: Some(project_id),
            ..Default::default()
        };
        let project = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(project)
    }
}

#[async_trait]
impl Insert<Project> for Connection {
    async fn insert(&self, project: Project) -> Result<Project> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO projects (
                    title,
                    description,
                    start_date,
                    end_date,
                    manager_id,
                    status
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&project.title)
                .push_bind(&project.description)
                .push_bind(project.start_date)
                .push_bind(project.end_date)
                .push_bind(project.manager_id)
                .push_bind(project.status);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Project> for Connection {
    async fn update(&self, project: Project) -> Result<Project> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE projects SET")
                .push(" title = ")
                .push_bind(&project.title)
                .push(", description = ")
                .push_bind(&project.description)
                .push(", start_date = ")
                .push_bind(project.start_date)
                .push(", end_date = ")
                .push_bind(project.end_date)
                .push(", manager_id = ")
                .push_bind(project.manager_id)
                .push(", status = ")
                .push_bind(project.status)
                .push(" WHERE id = ")
                .push_bind(project.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(project.id).await
    }
}

#[async_trait]
impl Delete<Project> for Connection {
    async fn delete(&self, project: Project) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM projects WHERE id = ")
            .push_bind(project.id)
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

    use quaestor_data::{Member, ProjectStatus};

    use crate::connection;

    #[tokio::test]
    async fn test_project_roundtrip() {
        let (_handle, conn) = connection::open_test().await;

        let manager = conn
            .insert(Member {
                name: "Grace".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let project = conn
            .insert(Project {
                title: "Journal relaunch".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                manager_id: manager.id,
                status: ProjectStatus::InProgress,
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(project.id > 0);
        assert_eq!(project.end_date, None);

        let mut project: Project = conn.retrieve(project.id).await.unwrap();
        project.end_date = NaiveDate::from_ymd_opt(2024, 9, 30);
        project.status = ProjectStatus::Completed;
        let project = conn.update(project).await.unwrap();
        assert_eq!(
            project.end_date,
            NaiveDate::from_ymd_opt(2024, 9, 30)
        );

        let projects: Vec<Project> = conn
            .query(&ProjectFilter {
                manager_id: Some(manager.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(projects.len(), 1);
    }
}
