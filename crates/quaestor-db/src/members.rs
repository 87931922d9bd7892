use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use quaestor_data::{
    Delete,
    Insert,
    Member,
    MemberFilter,
    Query,
    Retrieve,
    Update,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                name,
                email,
                role,
                joined_at,
                notes
            FROM members
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }
        if let Some(email) = filter.email.clone() {
            qry.push(" AND email LIKE ").push_bind(email);
        }

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    name,
                    email,
                    role,
                    joined_at,
                    notes
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.name)
                .push_bind(&member.email)
                .push_bind(member.role)
                .push_bind(member.joined_at)
                .push_bind(&member.notes);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Member> for Connection {
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" name = ")
                .push_bind(&member.name)
                .push(", email = ")
                .push_bind(&member.email)
                .push(", role = ")
                .push_bind(member.role)
                .push(", joined_at = ")
                .push_bind(member.joined_at)
                .push(", notes = ")
                .push_bind(&member.notes)
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
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

    use quaestor_data::Role;

    use crate::connection;

    #[tokio::test]
    async fn test_member_insert_and_retrieve() {
        let (_handle, conn) = connection::open_test().await;

        let member = Member {
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
            joined_at: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            ..Default::default()
        };
        let member = conn.insert(member).await.unwrap();
        assert!(member.id > 0);
        assert_eq!(member.role, Role::Member);

        let member: Member = conn.retrieve(member.id).await.unwrap();
        assert_eq!(member.name, "Ada");
        assert_eq!(member.email, "ada@example.org");
    }

    #[tokio::test]
    async fn test_member_query_by_name() {
        let (_handle, conn) = connection::open_test().await;

        for name in ["Ada", "Adalbert", "Grace"] {
            conn.insert(Member {
                name: name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let members: Vec<Member> = conn
            .query(&MemberFilter {
                name: Some("Ada".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(members.len(), 2);
    }

    #[tokio::test]
    async fn test_member_update_and_delete() {
        let (_handle, conn) = connection::open_test().await;

        let mut member = conn
            .insert(Member {
                name: "Ada".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        member.role = Role::Admin;
        member.notes = "board".to_string();
        let member = conn.update(member).await.unwrap();
        assert_eq!(member.role, Role::Admin);
        assert_eq!(member.notes, "board");

        let id = member.id;
        conn.delete(member).await.unwrap();
        let members: Vec<Member> = conn
            .query(&MemberFilter {
                id: Some(id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(members.is_empty());
    }
}
