//! Russian cities with student communities / 城市数据

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::directory::{Constraint, Directory, Filter, Record, ResultSet, SortOrder};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub id: u32,
    pub name: String,
    pub region: String,
    pub population: String,
    pub universities: u32,
}

impl Record for City {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.region]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CityQuery {
    pub search: Option<String>,
    pub region: Constraint<String>,
}

fn city(id: u32, name: &str, region: &str, population: &str, universities: u32) -> City {
    City {
        id,
        name: name.to_string(),
        region: region.to_string(),
        population: population.to_string(),
        universities,
    }
}

const CENTRAL: &str = "Central Federal District";
const NORTHWESTERN: &str = "Northwestern Federal District";
const SIBERIAN: &str = "Siberian Federal District";
const VOLGA: &str = "Volga Federal District";
const URAL: &str = "Ural Federal District";
const SOUTHERN: &str = "Southern Federal District";
const FAR_EASTERN: &str = "Far Eastern Federal District";

pub static CITIES: Lazy<Directory<City>> = Lazy::new(|| {
    Directory::new(
        "cities",
        vec![
            city(1, "Moscow", CENTRAL, "12.5M", 50),
            city(2, "St. Petersburg", NORTHWESTERN, "5.4M", 30),
            city(3, "Novosibirsk", SIBERIAN, "1.6M", 15),
            city(4, "Kazan", VOLGA, "1.2M", 20),
            city(5, "Yekaterinburg", URAL, "1.5M", 18),
            city(6, "Nizhny Novgorod", VOLGA, "1.2M", 12),
            city(7, "Chelyabinsk", URAL, "1.1M", 10),
            city(8, "Samara", VOLGA, "1.1M", 14),
            city(9, "Omsk", SIBERIAN, "1.1M", 11),
            city(10, "Rostov-on-Don", SOUTHERN, "1.1M", 13),
            city(11, "Ufa", VOLGA, "1.1M", 9),
            city(12, "Krasnoyarsk", SIBERIAN, "1.0M", 8),
            city(13, "Voronezh", CENTRAL, "1.0M", 10),
            city(14, "Perm", VOLGA, "1.0M", 7),
            city(15, "Volgograd", SOUTHERN, "1.0M", 9),
            city(16, "Krasnodar", SOUTHERN, "0.9M", 8),
            city(17, "Saratov", VOLGA, "0.8M", 7),
            city(18, "Tyumen", URAL, "0.8M", 6),
            city(19, "Tomsk", SIBERIAN, "0.6M", 5),
            city(20, "Vladivostok", FAR_EASTERN, "0.6M", 6),
        ],
        SortOrder::ByName,
    )
});

/// Filter by region, then search name/region / 按地区过滤后搜索
pub fn search(query: &CityQuery) -> ResultSet<&'static City> {
    let filter = Filter::new().when(&query.region, |c: &City, region: &String| &c.region == region);
    CITIES.query(&filter, super::search_text(&query.search))
}
