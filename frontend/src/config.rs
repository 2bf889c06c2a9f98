/// Backend base URL, fixed at compile time. Override with
/// `FINANCAS_API_URL=https://... trunk build`.
pub const API_BASE_URL: &str = match option_env!("FINANCAS_API_URL") {
    Some(url) => url,
    None => "https://financas-pessoais-backend-0dbj.onrender.com",
};

pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
