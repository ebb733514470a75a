use crate::{
    date::DAY_MILLIS,
    shared::entity::{Entity, ID},
};

/// Users should log their vitals at least this often
pub const VITALS_UPDATE_INTERVAL_MILLIS: i64 = DAY_MILLIS * 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Vital {
    pub date: i64,
    pub weight: Option<f64>,
    pub blood_pressure: Option<String>,
    pub sugar: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub name: Option<String>,
    /// Ordered by the time they were logged
    pub vitals: Vec<Vital>,
}

impl User {
    pub fn new(email: &str) -> Self {
        Self {
            id: Default::default(),
            email: email.trim().to_lowercase(),
            name: None,
            vitals: Default::default(),
        }
    }

    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    pub fn last_vital(&self) -> Option<&Vital> {
        self.vitals.last()
    }

    pub fn needs_vitals_reminder(&self, now: i64) -> bool {
        match self.last_vital() {
            Some(vital) => now - vital.date > VITALS_UPDATE_INTERVAL_MILLIS,
            None => true,
        }
    }

    pub fn vitals_reminder_message(&self) -> String {
        format!(
            "Hi {}, don't forget to update your monthly vitals (weight, blood pressure, sugar) in Medi-Scan.",
            self.display_name()
        )
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn vital(date: i64) -> Vital {
        Vital {
            date,
            weight: Some(70.0),
            blood_pressure: Some("120/80".into()),
            sugar: None,
        }
    }

    #[test]
    fn it_normalizes_email() {
        let user = User::new("  Jane.Doe@Example.COM ");
        assert_eq!(user.email, "jane.doe@example.com");
        assert_eq!(user.display_name(), "jane.doe@example.com");
    }

    #[test]
    fn users_without_vitals_need_reminder() {
        let user = User::new("a@b.com");
        assert!(user.needs_vitals_reminder(0));
    }

    #[test]
    fn only_latest_vital_counts() {
        let now = DAY_MILLIS * 100;
        let mut user = User::new("a@b.com");
        user.vitals.push(vital(now - DAY_MILLIS * 10));
        assert!(!user.needs_vitals_reminder(now));

        user.vitals.push(vital(now - DAY_MILLIS * 31));
        assert!(user.needs_vitals_reminder(now));
    }

    #[test]
    fn exactly_thirty_days_is_not_overdue() {
        let now = DAY_MILLIS * 100;
        let mut user = User::new("a@b.com");
        user.vitals.push(vital(now - VITALS_UPDATE_INTERVAL_MILLIS));
        assert!(!user.needs_vitals_reminder(now));
    }

    #[test]
    fn message_prefers_name() {
        let mut user = User::new("a@b.com");
        user.name = Some("Jane".into());
        assert!(user.vitals_reminder_message().starts_with("Hi Jane, "));
    }
}
