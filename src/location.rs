//! Office address swap / 办公地址切换
//!
//! Visitors in Russia see the Bangladesh office, everyone else sees the
//! Russia office.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::geoip::Country;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full: String,
    pub city: String,
    pub country: String,
    pub map_url: String,
}

static RUSSIA_OFFICE: Lazy<Address> = Lazy::new(|| Address {
    full: "Lukachova, Samara, Russia".to_string(),
    city: "Samara".to_string(),
    country: "Russia".to_string(),
    map_url: "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d90686.28664808045!2d50.14783532928807!3d53.21603998404287!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x41661f022c9c0ee5%3A0x98a0d7b16165dbca!2sLukachova%2011!5e1!3m2!1sen!2sbd!4v1762850460657!5m2!1sen!2sbd".to_string(),
});

static BANGLADESH_OFFICE: Lazy<Address> = Lazy::new(|| Address {
    full: "713, Ibrahimpur, North Kafrul, Dhaka-1206, Bangladesh".to_string(),
    city: "Dhaka".to_string(),
    country: "Bangladesh".to_string(),
    map_url: "https://www.google.com/maps/embed?pb=!1m14!1m8!1m3!1d541.3088712500295!2d90.3806177!3d23.7931478!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3755c7fe4bc513e9%3A0xf3bbf012e15f28cc!2s713%20North%20Kafrul!5e1!3m2!1sen!2sbd!4v1762850543790!5m2!1sen!2sbd".to_string(),
});

/// Address to display for a visitor country / 根据访客国家选择地址
pub fn resolve(country: Country) -> &'static Address {
    match country {
        Country::Russia => &BANGLADESH_OFFICE,
        Country::Bangladesh | Country::Unknown => &RUSSIA_OFFICE,
    }
}

pub fn resolve_code(code: &str) -> &'static Address {
    resolve(Country::from_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russia_sees_bangladesh() {
        assert_eq!(resolve(Country::Russia).country, "Bangladesh");
        assert_eq!(resolve_code("RU").city, "Dhaka");
    }

    #[test]
    fn test_everyone_else_sees_russia() {
        assert_eq!(resolve(Country::Bangladesh).country, "Russia");
        assert_eq!(resolve(Country::Unknown).city, "Samara");
        assert_eq!(resolve_code("XX"), resolve(Country::Unknown));
        assert_eq!(resolve_code(""), resolve(Country::Unknown));
    }
}
