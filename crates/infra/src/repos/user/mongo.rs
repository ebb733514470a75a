use super::IUserRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mediscan_domain::{User, Vital, ID};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoUserRepo {
    collection: Collection<Document>,
}

impl MongoUserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for MongoUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        mongo_repo::insert::<_, UserMongo>(&self.collection, user).await
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        mongo_repo::save::<_, UserMongo>(&self.collection, user).await
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        mongo_repo::find::<_, UserMongo>(&self.collection, user_id.inner_ref()).await
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let filter = doc! {
            "email": email.trim().to_lowercase()
        };
        mongo_repo::find_one_by::<_, UserMongo>(&self.collection, filter).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        mongo_repo::find_many_by::<_, UserMongo>(&self.collection, doc! {}).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct VitalMongo {
    date: i64,
    weight: Option<f64>,
    blood_pressure: Option<String>,
    sugar: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserMongo {
    _id: ObjectId,
    email: String,
    name: Option<String>,
    #[serde(default)]
    vitals: Vec<VitalMongo>,
}

impl MongoDocument<User> for UserMongo {
    fn to_domain(self) -> User {
        User {
            id: ID::from(self._id),
            email: self.email,
            name: self.name,
            vitals: self
                .vitals
                .into_iter()
                .map(|v| Vital {
                    date: v.date,
                    weight: v.weight,
                    blood_pressure: v.blood_pressure,
                    sugar: v.sugar,
                })
                .collect(),
        }
    }

    fn from_domain(user: &User) -> Self {
        Self {
            _id: user.id.inner(),
            email: user.email.clone(),
            name: user.name.clone(),
            vitals: user
                .vitals
                .iter()
                .map(|v| VitalMongo {
                    date: v.date,
                    weight: v.weight,
                    blood_pressure: v.blood_pressure.clone(),
                    sugar: v.sugar,
                })
                .collect(),
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id
        }
    }
}
