/// Server configuration loaded from environment variables.
///
/// All fields except the payment keys have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Payment processor configuration (keys, URLs, pricing).
    pub payment: PaymentConfig,
}

/// Payment-processor configuration.
///
/// Handed to the session builder and callback handler through [`ServerConfig`]
/// so the payment logic never reads ambient environment state.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Merchant public key, embedded in checkout payloads.
    pub public_key: String,
    /// Shared secret used symmetrically for request signing and callback
    /// verification. Never sent over the wire.
    pub private_key: String,
    /// Hosted checkout endpoint the client's form posts to.
    pub checkout_url: String,
    /// Browser redirect target after the processor finishes.
    pub result_url: String,
    /// Server-to-server callback endpoint sent as `server_url`.
    pub callback_url: String,
    /// Charge currency (default: `UAH`).
    pub currency: String,
    /// When set, all courses are charged this flat price instead of the
    /// per-record price. Events always use their stored price.
    pub course_flat_price: Option<f64>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// Panics if a value is present but malformed, or if a required payment
    /// key is missing -- misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let payment = PaymentConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            payment,
        }
    }
}

impl PaymentConfig {
    /// Load payment configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                                  |
    /// |-----------------------|----------|------------------------------------------|
    /// | `LIQPAY_PUBLIC_KEY`   | **yes**  | --                                       |
    /// | `LIQPAY_PRIVATE_KEY`  | **yes**  | --                                       |
    /// | `CHECKOUT_URL`        | no       | `https://www.liqpay.ua/api/3/checkout`   |
    /// | `RESULT_URL`          | no       | `http://localhost:3000/payment-result`   |
    /// | `CALLBACK_URL`        | no       | `http://localhost:3000/api/v1/payments/callback` |
    /// | `CURRENCY`            | no       | `UAH`                                    |
    /// | `COURSE_FLAT_PRICE`   | no       | unset (use per-course price)             |
    ///
    /// Panics if a key is missing or empty.
    pub fn from_env() -> Self {
        let public_key =
            std::env::var("LIQPAY_PUBLIC_KEY").expect("LIQPAY_PUBLIC_KEY must be set");
        assert!(!public_key.is_empty(), "LIQPAY_PUBLIC_KEY must not be empty");

        let private_key =
            std::env::var("LIQPAY_PRIVATE_KEY").expect("LIQPAY_PRIVATE_KEY must be set");
        assert!(
            !private_key.is_empty(),
            "LIQPAY_PRIVATE_KEY must not be empty"
        );

        let checkout_url = std::env::var("CHECKOUT_URL")
            .unwrap_or_else(|_| "https://www.liqpay.ua/api/3/checkout".into());

        let result_url = std::env::var("RESULT_URL")
            .unwrap_or_else(|_| "http://localhost:3000/payment-result".into());

        let callback_url = std::env::var("CALLBACK_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1/payments/callback".into());

        let currency = std::env::var("CURRENCY").unwrap_or_else(|_| "UAH".into());

        let course_flat_price: Option<f64> = std::env::var("COURSE_FLAT_PRICE")
            .ok()
            .map(|v| v.parse().expect("COURSE_FLAT_PRICE must be a valid number"));

        Self {
            public_key,
            private_key,
            checkout_url,
            result_url,
            callback_url,
            currency,
            course_flat_price,
        }
    }
}
