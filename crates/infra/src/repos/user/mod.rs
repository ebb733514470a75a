mod inmemory;
mod mongo;

pub use inmemory::InMemoryUserRepo;
use mediscan_domain::{User, ID};
pub use mongo::MongoUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
}

#[cfg(test)]
mod tests {
    use crate::MediscanContext;
    use mediscan_domain::{User, Vital};

    #[tokio::test]
    async fn it_finds_users_by_id_and_email() {
        let ctx = MediscanContext::create_inmemory();

        let user = User::new("Jane@Example.com");
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let found = ctx.repos.users.find(&user.id).await.expect("To query user");
        assert_eq!(found, Some(user.clone()));

        let found = ctx
            .repos
            .users
            .find_by_email(" JANE@example.com ")
            .await
            .expect("To query user");
        assert_eq!(found.map(|u| u.id), Some(user.id));

        let missing = ctx
            .repos
            .users
            .find(&Default::default())
            .await
            .expect("To query user");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn it_saves_vitals() {
        let ctx = MediscanContext::create_inmemory();

        let mut user = User::new("a@b.com");
        ctx.repos.users.insert(&user).await.expect("To insert user");
        user.vitals.push(Vital {
            date: 10,
            weight: Some(70.5),
            blood_pressure: None,
            sugar: Some(90.0),
        });
        ctx.repos.users.save(&user).await.expect("To save user");

        let users = ctx.repos.users.find_all().await.expect("To query users");
        assert_eq!(users, vec![user]);
    }
}
