//! Student communities / 学生社区
//!
//! Listing keeps authored order (no resort). Detail pages share one mock
//! activity feed, event list and member roster.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::directory::{Constraint, Directory, Filter, Record, ResultSet, Selection, SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityKind {
    City,
    University,
}

impl FromStr for CommunityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "city" => Ok(CommunityKind::City),
            "university" => Ok(CommunityKind::University),
            other => Err(format!("unknown community type: {}", other)),
        }
    }
}

/// Visitor relation to a community / 成员状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStatus {
    Member,
    Pending,
    Guest,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommunityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_id: Option<u32>,
    pub description: String,
    pub member_count: u32,
    pub leader: Person,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub is_joined: bool,
    pub join_status: JoinStatus,
}

impl Record for Community {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.description.as_str()];
        fields.extend(self.city.as_deref());
        fields.extend(self.university.as_deref());
        fields.push(&self.leader.name);
        fields
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommunityQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Constraint<CommunityKind>,
    #[serde(alias = "cityIds")]
    pub city_ids: Selection<u32>,
    #[serde(alias = "universityIds")]
    pub university_ids: Selection<u32>,
}

const AVATAR_AHMED: &str = "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?w=100&h=100&fit=crop";
const AVATAR_FATIMA: &str = "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?w=100&h=100&fit=crop";
const AVATAR_RASHID: &str = "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop";
const AVATAR_SARA: &str = "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=100&h=100&fit=crop";
const AVATAR_MOHAMMAD: &str = "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=100&h=100&fit=crop";
const AVATAR_AYESHA: &str = "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=100&h=100&fit=crop";

fn person(name: &str, avatar: &str) -> Person {
    Person {
        name: name.to_string(),
        avatar: Some(avatar.to_string()),
    }
}

fn city_community(
    id: &str,
    name: &str,
    city: (&str, u32),
    description: &str,
    member_count: u32,
    leader: Person,
    join_status: JoinStatus,
) -> Community {
    Community {
        id: id.to_string(),
        name: name.to_string(),
        kind: CommunityKind::City,
        city: Some(city.0.to_string()),
        city_id: Some(city.1),
        university: None,
        university_id: None,
        description: description.to_string(),
        member_count,
        leader,
        image: None,
        is_joined: matches!(join_status, JoinStatus::Member | JoinStatus::Guest),
        join_status,
    }
}

fn university_community(
    id: &str,
    university: (&str, u32),
    city: (&str, u32),
    description: &str,
    member_count: u32,
    leader: Person,
    join_status: JoinStatus,
) -> Community {
    Community {
        kind: CommunityKind::University,
        university: Some(university.0.to_string()),
        university_id: Some(university.1),
        ..city_community(id, university.0, city, description, member_count, leader, join_status)
    }
}

pub static COMMUNITIES: Lazy<Directory<Community>> = Lazy::new(|| {
    Directory::new(
        "communities",
        vec![
            city_community(
                "1",
                "Moscow Student Community",
                ("Moscow", 1),
                "Connect with students studying in Moscow. Share experiences, events, and support each other.",
                245,
                person("Ahmed Rahman", AVATAR_AHMED),
                JoinStatus::None,
            ),
            city_community(
                "2",
                "St. Petersburg Community",
                ("St. Petersburg", 2),
                "Join fellow students in St. Petersburg. Organize meetups, cultural events, and study groups.",
                189,
                person("Fatima Khan", AVATAR_FATIMA),
                JoinStatus::Member,
            ),
            university_community(
                "3",
                ("Moscow State University", 1),
                ("Moscow", 1),
                "Official community for MSU students. Academic discussions, campus events, and student support.",
                156,
                person("Rashid Ali", AVATAR_RASHID),
                JoinStatus::Pending,
            ),
            city_community(
                "4",
                "Novosibirsk Students",
                ("Novosibirsk", 3),
                "Community for students in Novosibirsk. Share resources, organize activities, and build friendships.",
                98,
                person("Sara Ahmed", AVATAR_SARA),
                JoinStatus::None,
            ),
            university_community(
                "5",
                ("ITMO University", 11),
                ("St. Petersburg", 2),
                "ITMO University student community. Tech events, hackathons, and academic collaboration.",
                112,
                person("Mohammad Hasan", AVATAR_MOHAMMAD),
                JoinStatus::Guest,
            ),
            city_community(
                "6",
                "Kazan Community",
                ("Kazan", 4),
                "Join students in Kazan. Cultural exchange, study groups, and community events.",
                134,
                person("Ayesha Begum", AVATAR_AYESHA),
                JoinStatus::None,
            ),
        ],
        SortOrder::Insertion,
    )
});

/// Filter by type, cities and universities, then search / 按类型、城市、大学过滤后搜索
///
/// With a university selection active, city communities are still listed;
/// university communities must be in the selection.
pub fn search(query: &CommunityQuery) -> ResultSet<&'static Community> {
    let filter = Filter::new()
        .when(&query.kind, |c: &Community, kind: &CommunityKind| c.kind == *kind)
        .when_selected(&query.city_ids, |c: &Community, ids| {
            c.city_id.map_or(false, |id| ids.contains(&id))
        })
        .when_selected(&query.university_ids, |c: &Community, ids| match c.kind {
            CommunityKind::University => c.university_id.map_or(false, |id| ids.contains(&id)),
            CommunityKind::City => true,
        });
    COMMUNITIES.query(&filter, super::search_text(&query.search))
}

pub fn get(id: &str) -> Option<&'static Community> {
    COMMUNITIES.get(&id.to_string())
}

// Detail feed / 社区动态

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Event,
    Request,
    Post,
    Join,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Leader,
    Member,
    Guest,
}

#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub name: String,
    pub avatar: Option<String>,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub likes: u32,
    pub comments: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub organizer: Person,
    pub attendees: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub role: MemberRole,
    pub join_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    pub status: MemberStatus,
}

/// Roster tab filter: `all`, `active`, `pending` or `guest` / 成员筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberFilter {
    Active,
    Pending,
    Guest,
}

impl FromStr for MemberFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(MemberFilter::Active),
            "pending" => Ok(MemberFilter::Pending),
            "guest" => Ok(MemberFilter::Guest),
            other => Err(format!("unknown member filter: {}", other)),
        }
    }
}

impl MemberFilter {
    pub fn matches(&self, member: &Member) -> bool {
        match self {
            MemberFilter::Active => member.status == MemberStatus::Active,
            MemberFilter::Pending => member.status == MemberStatus::Pending,
            MemberFilter::Guest => member.role == MemberRole::Guest,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommunityFeed {
    pub activities: Vec<Activity>,
    pub events: Vec<Event>,
    pub members: Vec<Member>,
}

static FEED: Lazy<CommunityFeed> = Lazy::new(|| CommunityFeed {
    activities: vec![
        Activity {
            id: "1".to_string(),
            kind: ActivityKind::Event,
            title: "Cultural Exchange Meetup".to_string(),
            content: "Join us for a cultural exchange event this Saturday! We'll have food, music, and games from different countries.".to_string(),
            author: Author { name: "Ahmed Rahman".to_string(), avatar: Some(AVATAR_AHMED.to_string()), role: MemberRole::Leader },
            timestamp: "2 hours ago".to_string(),
            event_date: Some("2024-01-20T15:00:00".to_string()),
            location: Some("Moscow City Center".to_string()),
            likes: 24,
            comments: 8,
        },
        Activity {
            id: "2".to_string(),
            kind: ActivityKind::Request,
            title: "Looking for Study Group".to_string(),
            content: "I'm looking for a study group for Russian language classes. Anyone interested in joining?".to_string(),
            author: Author { name: "Fatima Khan".to_string(), avatar: Some(AVATAR_FATIMA.to_string()), role: MemberRole::Member },
            timestamp: "5 hours ago".to_string(),
            event_date: None,
            location: None,
            likes: 12,
            comments: 5,
        },
        Activity {
            id: "3".to_string(),
            kind: ActivityKind::Post,
            title: "Tips for New Students".to_string(),
            content: "Here are some helpful tips for new students arriving in Moscow: 1) Get your metro card early, 2) Join student groups, 3) Learn basic Russian phrases...".to_string(),
            author: Author { name: "Rashid Ali".to_string(), avatar: Some(AVATAR_RASHID.to_string()), role: MemberRole::Member },
            timestamp: "1 day ago".to_string(),
            event_date: None,
            location: None,
            likes: 45,
            comments: 12,
        },
    ],
    events: vec![
        Event {
            id: "1".to_string(),
            title: "Cultural Exchange Meetup".to_string(),
            description: "Join us for a cultural exchange event this Saturday! We'll have food, music, and games from different countries.".to_string(),
            date: "2024-01-20".to_string(),
            time: "15:00".to_string(),
            location: "Moscow City Center, Red Square".to_string(),
            organizer: person("Ahmed Rahman", AVATAR_AHMED),
            attendees: 24,
            max_attendees: Some(50),
            category: "Social".to_string(),
        },
        Event {
            id: "2".to_string(),
            title: "Study Group Session".to_string(),
            description: "Weekly study group for Russian language learners. All levels welcome!".to_string(),
            date: "2024-01-22".to_string(),
            time: "18:00".to_string(),
            location: "Moscow State University Library".to_string(),
            organizer: person("Fatima Khan", AVATAR_FATIMA),
            attendees: 12,
            max_attendees: Some(20),
            category: "Academic".to_string(),
        },
        Event {
            id: "3".to_string(),
            title: "City Tour for New Students".to_string(),
            description: "Explore Moscow with fellow students! Visit historical sites and popular spots.".to_string(),
            date: "2024-01-25".to_string(),
            time: "10:00".to_string(),
            location: "Meeting at Metro Station: Lubyanka".to_string(),
            organizer: person("Rashid Ali", AVATAR_RASHID),
            attendees: 18,
            max_attendees: Some(30),
            category: "Tour".to_string(),
        },
    ],
    members: vec![
        member("1", "Ahmed Rahman", AVATAR_AHMED, MemberRole::Leader, "2023-01-15", Some(("Moscow State University", "Medicine")), MemberStatus::Active),
        member("2", "Fatima Khan", AVATAR_FATIMA, MemberRole::Member, "2023-03-20", Some(("St. Petersburg State University", "Engineering")), MemberStatus::Active),
        member("3", "Rashid Ali", AVATAR_RASHID, MemberRole::Member, "2023-05-10", Some(("Novosibirsk State University", "Computer Science")), MemberStatus::Active),
        member("4", "Sara Ahmed", AVATAR_SARA, MemberRole::Member, "2023-07-05", Some(("Kazan Federal University", "Business Administration")), MemberStatus::Active),
        member("5", "Mohammad Hasan", AVATAR_MOHAMMAD, MemberRole::Guest, "2023-09-12", None, MemberStatus::Active),
        member("6", "Ayesha Begum", AVATAR_AYESHA, MemberRole::Member, "2023-11-01", Some(("ITMO University", "Information Technology")), MemberStatus::Pending),
    ],
});

fn member(
    id: &str,
    name: &str,
    avatar: &str,
    role: MemberRole,
    join_date: &str,
    study: Option<(&str, &str)>,
    status: MemberStatus,
) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        avatar: Some(avatar.to_string()),
        role,
        join_date: join_date.to_string(),
        university: study.map(|(u, _)| u.to_string()),
        course: study.map(|(_, c)| c.to_string()),
        status,
    }
}

/// Feed for a community with the roster narrowed by `member_filter` / 社区详情动态
pub fn feed(member_filter: &Constraint<MemberFilter>) -> CommunityFeed {
    let roster = Filter::new().when(member_filter, |m: &Member, f: &MemberFilter| f.matches(m));
    CommunityFeed {
        activities: FEED.activities.clone(),
        events: FEED.events.clone(),
        members: roster.apply(FEED.members.iter()).into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids<'a>(r: &ResultSet<&'a Community>) -> Vec<&'a str> {
        r.data.iter().map(|c| c.id.as_str()).collect()
    }

    fn query(search: Option<&str>, kind: Option<&str>, cities: Option<&str>, universities: Option<&str>) -> CommunityQuery {
        CommunityQuery {
            search: search.map(str::to_string),
            kind: Constraint::parse(kind),
            city_ids: Selection::parse(cities),
            university_ids: Selection::parse(universities),
        }
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<String> = COMMUNITIES.records().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), COMMUNITIES.total());
    }

    #[test]
    fn test_listing_keeps_authored_order() {
        let result = search(&CommunityQuery::default());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5", "6"]);
        assert_eq!(result.count, 6);
        assert_eq!(result.total, 6);
    }

    #[test]
    fn test_type_filter() {
        let result = search(&query(None, Some("university"), None, None));
        assert_eq!(ids(&result), vec!["3", "5"]);
    }

    #[test]
    fn test_city_selection() {
        let result = search(&query(None, None, Some("1,4"), None));
        assert_eq!(ids(&result), vec!["1", "3", "6"]);
    }

    #[test]
    fn test_university_selection_keeps_city_communities() {
        let result = search(&query(None, None, None, Some("11")));
        assert_eq!(ids(&result), vec!["1", "2", "4", "5", "6"]);
    }

    #[test]
    fn test_multi_token_search_spans_fields() {
        // "ahmed" from the leader, "moscow" from the name
        let result = search(&query(Some("moscow  AHMED"), None, None, None));
        assert_eq!(ids(&result), vec!["1"]);
        let reversed = search(&query(Some("ahmed moscow"), None, None, None));
        assert_eq!(ids(&result), ids(&reversed));
    }

    #[test]
    fn test_search_university_field() {
        let result = search(&query(Some("itmo"), None, None, None));
        assert_eq!(ids(&result), vec!["5"]);
    }

    #[test]
    fn test_each_constraint_only_shrinks() {
        let base = search(&query(Some("students"), None, None, None));
        let narrowed = search(&query(Some("students"), Some("city"), Some("1,2,3"), None));
        assert!(narrowed.count <= base.count);
        for c in &narrowed.data {
            assert!(base.data.iter().any(|b| b.id == c.id));
        }
    }

    #[test]
    fn test_get() {
        assert_eq!(get("5").map(|c| c.name.as_str()), Some("ITMO University"));
        assert!(get("99").is_none());
    }

    #[test]
    fn test_feed_member_filter() {
        let all = feed(&Constraint::Any);
        assert_eq!(all.members.len(), 6);
        assert_eq!(all.events.len(), 3);

        let pending = feed(&Constraint::parse(Some("pending")));
        assert_eq!(pending.members.len(), 1);
        assert_eq!(pending.members[0].name, "Ayesha Begum");

        let guests = feed(&Constraint::parse(Some("guest")));
        assert_eq!(guests.members.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(), vec!["5"]);

        let active = feed(&Constraint::parse(Some("active")));
        assert_eq!(active.members.len(), 5);
    }
}
