use crate::model::{Role, Team, User};
use chrono::{DateTime, Utc};

/// Input from the "create team" dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
    pub manager_id: String,
}

pub fn new_team_id(now: DateTime<Utc>) -> String {
    format!("team_{}", now.timestamp_millis())
}

/// Editable in-memory copy of the user/team fixtures. Nothing is persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamDirectory {
    users: Vec<User>,
    teams: Vec<Team>,
}

impl TeamDirectory {
    pub fn new(users: Vec<User>, teams: Vec<Team>) -> Self {
        Self { users, teams }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn members_of(&self, team_id: &str) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.teams.iter().any(|t| t == team_id))
            .collect()
    }

    pub fn teams_of(&self, user_id: &str) -> Vec<&Team> {
        let Some(user) = self.user(user_id) else {
            return Vec::new();
        };
        self.teams
            .iter()
            .filter(|t| user.teams.contains(&t.id))
            .collect()
    }

    /// Users allowed to lead a new team.
    pub fn manager_candidates(&self) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| matches!(u.role, Role::Manager | Role::Admin))
            .collect()
    }

    /// Adds a team led by the draft's manager. Returns `None` and changes
    /// nothing when the name or manager is missing.
    pub fn create_team(&mut self, draft: TeamDraft, id: String) -> Option<String> {
        let name = draft.name.trim();
        if name.is_empty() || draft.manager_id.is_empty() {
            tracing::warn!("create team ignored: name and manager are required");
            return None;
        }
        let manager = self.users.iter_mut().find(|u| u.id == draft.manager_id)?;
        manager.teams.push(id.clone());

        let description = if draft.description.trim().is_empty() {
            format!("{name} department")
        } else {
            draft.description
        };
        self.teams.push(Team {
            id: id.clone(),
            name: name.to_string(),
            manager_id: draft.manager_id.clone(),
            member_ids: vec![draft.manager_id],
            description,
        });
        tracing::debug!(team = %id, "team created");
        Some(id)
    }

    pub fn change_role(&mut self, user_id: &str, role: Role) -> bool {
        match self.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.role = role;
                true
            }
            None => false,
        }
    }

    /// Adds or removes a user from a team, updating both sides.
    pub fn toggle_membership(&mut self, user_id: &str, team_id: &str) -> bool {
        let Some(team) = self.teams.iter_mut().find(|t| t.id == team_id) else {
            return false;
        };
        let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) else {
            return false;
        };

        if user.teams.iter().any(|t| t == team_id) {
            user.teams.retain(|t| t != team_id);
        } else {
            user.teams.push(team_id.to_string());
        }
        if team.member_ids.iter().any(|m| m == user_id) {
            team.member_ids.retain(|m| m != user_id);
        } else {
            team.member_ids.push(user_id.to_string());
        }
        true
    }

    pub fn delete_team(&mut self, team_id: &str) -> bool {
        let before = self.teams.len();
        self.teams.retain(|t| t.id != team_id);
        for user in &mut self.users {
            user.teams.retain(|t| t != team_id);
        }
        self.teams.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{DataProvider, FixtureProvider};

    fn directory() -> TeamDirectory {
        let provider = FixtureProvider::load().expect("load");
        TeamDirectory::new(provider.users(), provider.teams())
    }

    #[test]
    fn create_team_without_manager_is_noop() {
        let mut dir = directory();
        let before = dir.clone();
        let created = dir.create_team(
            TeamDraft {
                name: "Ops".into(),
                ..TeamDraft::default()
            },
            "team_x".into(),
        );
        assert!(created.is_none());
        assert_eq!(dir, before);
    }

    #[test]
    fn create_team_with_blank_name_is_noop() {
        let mut dir = directory();
        let created = dir.create_team(
            TeamDraft {
                name: "   ".into(),
                manager_id: "user_002".into(),
                ..TeamDraft::default()
            },
            "team_x".into(),
        );
        assert!(created.is_none());
        assert_eq!(dir.teams().len(), 3);
    }

    #[test]
    fn create_team_adds_manager_as_member() {
        let mut dir = directory();
        let id = dir
            .create_team(
                TeamDraft {
                    name: "Ops".into(),
                    description: String::new(),
                    manager_id: "user_003".into(),
                },
                "team_99".into(),
            )
            .expect("created");
        let team = dir.team(&id).expect("team");
        assert_eq!(team.member_ids, vec!["user_003".to_string()]);
        assert_eq!(team.description, "Ops department");
        assert!(dir.user("user_003").expect("user").teams.contains(&id));
    }

    #[test]
    fn delete_team_clears_user_membership() {
        let mut dir = directory();
        assert!(dir.delete_team("team_001"));
        assert!(dir.team("team_001").is_none());
        assert!(dir
            .users()
            .iter()
            .all(|u| !u.teams.iter().any(|t| t == "team_001")));
    }

    #[test]
    fn toggle_membership_is_symmetric() {
        let mut dir = directory();
        assert!(dir.toggle_membership("user_007", "team_001"));
        assert!(dir.team("team_001").expect("team").member_ids.contains(&"user_007".to_string()));
        assert_eq!(dir.teams_of("user_007").len(), 2);

        assert!(dir.toggle_membership("user_007", "team_001"));
        assert!(!dir.team("team_001").expect("team").member_ids.contains(&"user_007".to_string()));
        assert_eq!(dir.members_of("team_001").len(), 3);
    }

    #[test]
    fn change_role_updates_candidates() {
        let mut dir = directory();
        assert_eq!(dir.manager_candidates().len(), 3);
        assert!(dir.change_role("user_006", Role::Manager));
        assert_eq!(dir.manager_candidates().len(), 4);
        assert!(!dir.change_role("nobody", Role::Admin));
    }

    #[test]
    fn team_ids_use_millis() {
        let now = chrono::DateTime::from_timestamp_millis(1_700_000_000_123).expect("ts");
        assert_eq!(new_team_id(now), "team_1700000000123");
    }
}
