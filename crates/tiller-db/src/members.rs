use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tiller_data::{Count, Insert, Member, MemberFilter, MemberOrder, Query, Retrieve};

use crate::{
    conditions::{order_by, push_conditions},
    results::{is_unique_violation, Id, QueryError, Total},
    Connection,
};

const SELECT_MEMBERS: &str = r#"
    SELECT
        wyc_number,
        first,
        last,
        street_address,
        city,
        state,
        zip_code,
        phone1,
        phone2,
        email,
        category,
        expire_qtr,
        student_id,
        password,
        out_to_sea,
        join_date
    FROM members
    WHERE 1
"#;

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(SELECT_MEMBERS);
        push_conditions(&mut qry, &filter.conditions());

        match filter.order {
            MemberOrder::ExpireQtr { descending } => {
                qry.push(order_by("expire_qtr", descending));
            }
            MemberOrder::JoinDate { descending } => {
                qry.push(order_by("join_date", descending));
            }
        }

        if let Some(page) = filter.page {
            qry.push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        let members: Vec<Member> = qry
            .build_query_as()
            .fetch_all(&mut *conn)
            .await
            .map_err(QueryError::failed)?;
        Ok(members)
    }
}

#[async_trait]
impl Count<Member> for Connection {
    type Filter = MemberFilter;

    /// Count members matching the filter conditions. Ordering and
    /// pagination do not apply, so the result is the full match count
    /// the pager needs.
    async fn count(&self, filter: &Self::Filter) -> Result<u32> {
        let mut conn = self.lock().await;
        let mut qry =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM members WHERE 1");
        push_conditions(&mut qry, &filter.conditions());

        let total: Total = qry
            .build_query_as()
            .fetch_one(&mut *conn)
            .await
            .map_err(QueryError::failed)?;
        Ok(total.total as u32)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;
    async fn retrieve(&self, wyc_number: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            wyc_id: Some(wyc_number.to_string()),
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
                    wyc_number,
                    first,
                    last,
                    street_address,
                    city,
                    state,
                    zip_code,
                    phone1,
                    phone2,
                    email,
                    category,
                    expire_qtr,
                    student_id,
                    password,
                    out_to_sea,
                    join_date
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(member.wyc_number)
                .push_bind(&member.first)
                .push_bind(&member.last)
                .push_bind(&member.street_address)
                .push_bind(&member.city)
                .push_bind(&member.state)
                .push_bind(&member.zip_code)
                .push_bind(&member.phone1)
                .push_bind(&member.phone2)
                .push_bind(&member.email)
                .push_bind(member.category)
                .push_bind(member.expire_qtr)
                .push_bind(member.student_id)
                .push_bind(&member.password)
                .push_bind(member.out_to_sea)
                .push_bind(member.join_date);

            qry.push(") RETURNING wyc_number AS id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await
                .map_err(|err| insert_error(err, member.wyc_number))?
        };
        self.retrieve(insert.id).await
    }
}

fn insert_error(err: sqlx::Error, wyc_number: u32) -> anyhow::Error {
    if is_unique_violation(&err) {
        QueryError::DuplicateKey(wyc_number).into()
    } else {
        QueryError::failed(err).into()
    }
}

impl Connection {
    /// The WYC number of the member who joined most recently. Used to
    /// suggest the next number when adding a member.
    pub async fn most_recent_wyc_number(&self) -> Result<u32> {
        let mut conn = self.lock().await;
        let row: Option<Id<u32>> = sqlx::query_as(
            "SELECT wyc_number AS id FROM members ORDER BY join_date DESC LIMIT 1",
        )
        .fetch_optional(&mut *conn)
        .await
        .map_err(QueryError::failed)?;
        Ok(row.map(|row| row.id).unwrap_or(0))
    }
}
