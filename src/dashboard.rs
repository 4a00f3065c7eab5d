//! Student dashboard content / 学生面板
//!
//! Progress, tasks and notifications are fixed demo content; only the
//! greeting depends on the session.

use serde::Serialize;

use crate::session::Profile;

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStage {
    pub id: u32,
    pub name: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: u32,
    pub title: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: u32,
    pub message: &'static str,
    pub time: &'static str,
    pub unread: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub stages: Vec<ApplicationStage>,
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent / 完成百分比
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user: Profile,
    pub progress: Progress,
    pub tasks: Vec<Task>,
    pub notifications: Vec<Notification>,
    pub unread_notifications: usize,
}

fn stages() -> Vec<ApplicationStage> {
    [
        (1, "Profile Complete", true),
        (2, "Documents Uploaded", true),
        (3, "Application Submitted", true),
        (4, "Response Received", false),
        (5, "Visa Processing", false),
        (6, "Ready to Fly", false),
    ]
    .into_iter()
    .map(|(id, name, completed)| ApplicationStage { id, name, completed })
    .collect()
}

fn tasks() -> Vec<Task> {
    [
        (1, "Upload passport copy", true),
        (2, "Submit academic transcripts", true),
        (3, "Complete medical certificate", false),
        (4, "Confirm university preference", false),
    ]
    .into_iter()
    .map(|(id, title, completed)| Task { id, title, completed })
    .collect()
}

fn notifications() -> Vec<Notification> {
    [
        (1, "Your application is under review", "2 hours ago", true),
        (2, "Document verification completed", "1 day ago", true),
        (3, "Welcome to GlobalEdu Gateway!", "3 days ago", false),
    ]
    .into_iter()
    .map(|(id, message, time, unread)| Notification { id, message, time, unread })
    .collect()
}

pub fn progress(stages: Vec<ApplicationStage>) -> Progress {
    let total = stages.len();
    let completed = stages.iter().filter(|s| s.completed).count();
    let percent = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    };
    Progress { stages, completed, total, percent }
}

pub fn for_user(user: Profile) -> Dashboard {
    let notifications = notifications();
    let unread_notifications = notifications.iter().filter(|n| n.unread).count();
    Dashboard {
        user,
        progress: progress(stages()),
        tasks: tasks(),
        notifications,
        unread_notifications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        let p = progress(stages());
        assert_eq!(p.completed, 3);
        assert_eq!(p.total, 6);
        assert_eq!(p.percent, 50);
        assert_eq!(progress(Vec::new()).percent, 0);
    }

    #[test]
    fn test_dashboard_for_user() {
        let dashboard = for_user(Profile::from_identifier("nadia@example.com"));
        assert_eq!(dashboard.user.name, "nadia");
        assert_eq!(dashboard.tasks.len(), 4);
        assert_eq!(dashboard.unread_notifications, 2);
    }
}
