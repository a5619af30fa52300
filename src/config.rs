#[derive(Clone)]
pub struct Config {
    /// Key for the Gemini API. Optional: without it the executive brief
    /// degrades to the fallback summary instead of failing startup.
    pub gemini_api_key: Option<String>,
    /// Shared access code required for staff/HOD/VC logins. When unset,
    /// staff roles are granted on selection alone.
    pub staff_access_code: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();

        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let staff_access_code = std::env::var("STAFF_ACCESS_CODE")
            .ok()
            .filter(|c| !c.is_empty());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5002".to_string())
            .parse()
            .unwrap_or(5002);

        Ok(Self {
            gemini_api_key,
            staff_access_code,
            host,
            port,
        })
    }
}
