//! Partner universities / 大学数据

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::directory::{Constraint, Directory, Filter, Record, ResultSet, SortOrder};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct University {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub abbreviation: String,
}

impl Record for University {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.abbreviation, &self.city]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UniversityQuery {
    pub search: Option<String>,
    pub city: Constraint<String>,
}

fn university(id: u32, name: &str, city: &str, abbreviation: &str) -> University {
    University {
        id,
        name: name.to_string(),
        city: city.to_string(),
        abbreviation: abbreviation.to_string(),
    }
}

pub static UNIVERSITIES: Lazy<Directory<University>> = Lazy::new(|| {
    Directory::new(
        "universities",
        vec![
            university(1, "Moscow State University", "Moscow", "MSU"),
            university(2, "St. Petersburg State University", "St. Petersburg", "SPbSU"),
            university(3, "Novosibirsk State University", "Novosibirsk", "NSU"),
            university(4, "Kazan Federal University", "Kazan", "KFU"),
            university(5, "Tomsk State University", "Tomsk", "TSU"),
            university(6, "Ural Federal University", "Yekaterinburg", "UrFU"),
            university(7, "Peoples' Friendship University", "Moscow", "RUDN"),
            university(8, "Siberian Federal University", "Krasnoyarsk", "SibFU"),
            university(9, "Southern Federal University", "Rostov-on-Don", "SFU"),
            university(10, "Far Eastern Federal University", "Vladivostok", "FEFU"),
            university(11, "ITMO University", "St. Petersburg", "ITMO"),
            university(12, "Moscow Institute of Physics and Technology", "Moscow", "MIPT"),
            university(13, "Higher School of Economics", "Moscow", "HSE"),
            university(14, "Peter the Great St. Petersburg Polytechnic University", "St. Petersburg", "SPbPU"),
            university(15, "Bauman Moscow State Technical University", "Moscow", "BMSTU"),
            university(16, "Moscow Aviation Institute", "Moscow", "MAI"),
            university(17, "Kazan State Medical University", "Kazan", "KSMU"),
            university(18, "Sechenov University", "Moscow", "Sechenov"),
            university(19, "Novosibirsk Technical University", "Novosibirsk", "NSTU"),
            university(20, "Samara University", "Samara", "SamaraU"),
        ],
        SortOrder::ByName,
    )
});

/// Filter by city, then search name/abbreviation/city / 按城市过滤后搜索
pub fn search(query: &UniversityQuery) -> ResultSet<&'static University> {
    let filter = Filter::new().when(&query.city, |u: &University, city: &String| &u.city == city);
    UNIVERSITIES.query(&filter, super::search_text(&query.search))
}
