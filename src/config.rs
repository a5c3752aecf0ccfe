use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub page_size: i64,
}

impl Config {
    pub fn init() -> Config {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let jwt_maxage = env::var("JWT_MAXAGE")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<i64>()
            .expect("JWT_MAXAGE must be a number of minutes");
        let page_size = env::var("PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<i64>()
            .expect("PAGE_SIZE must be a number");

        Config {
            database_url,
            jwt_secret,
            jwt_maxage,
            page_size,
        }
    }
}
