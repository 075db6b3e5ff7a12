/// Configuration macros for single-declaration config structs
///
/// `config_struct!` defines a configuration structure and its defaults in one
/// place. It generates:
/// - The struct with public fields
/// - The Default implementation
/// - Serde support with `#[serde(default)]`, so partial TOML files work
///
/// # Example
/// ```
/// soldevkit::config_struct! {
///     pub struct NftConfig {
///         das_url: String = "https://api.mainnet-beta.solana.com".to_string(),
///         request_timeout_secs: u64 = 15,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
