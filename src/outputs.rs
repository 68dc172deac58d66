use aws_config::meta::region::RegionProviderChain;
use aws_sdk_cloudformation::model::Output;
use aws_types::region::Region;

use crate::config::ConfigEntry;

/// Region the CDK deployment tooling exports; checked before the SDK's own
/// provider chain so the generator and the deployment agree on a region.
const CDK_REGION_VAR: &str = "CDK_DEFAULT_REGION";

const USER_POOL_ID_KEY: &str = "UserPoolId";
const USER_POOL_CLIENT_ID_KEY: &str = "UserPoolClientId";
const PROXY_ENDPOINT_KEY: &str = "ProxyEndpoint";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Network error for stack {0}: {1}")]
    Network(String, String),

    #[error("Stack {0} not found in region {1}")]
    NotFound(String, String),

    #[error("No region resolved for stack {0}")]
    MissingRegion(String),
}

/// Auth-related Outputs of a single stack. Keys the stack does not declare
/// resolve to empty strings rather than failing the run.
#[derive(Debug, Default, PartialEq)]
pub struct AuthOutputs {
    pub user_pool_id: String,
    pub user_pool_client_id: String,
    pub proxy_endpoint: String,
}

impl AuthOutputs {
    /// Single scan over the Outputs list. CFN does not promise unique keys,
    /// so the first entry wins for each recognized key; anything else is
    /// skipped.
    pub fn from_outputs(outputs: &[Output]) -> Self {
        let mut user_pool_id = None;
        let mut user_pool_client_id = None;
        let mut proxy_endpoint = None;

        for output in outputs {
            let value = output.output_value().unwrap_or_default();

            match output.output_key() {
                Some(USER_POOL_ID_KEY) if user_pool_id.is_none() => {
                    user_pool_id = Some(value.to_string());
                }
                Some(USER_POOL_CLIENT_ID_KEY) if user_pool_client_id.is_none() => {
                    user_pool_client_id = Some(value.to_string());
                }
                Some(PROXY_ENDPOINT_KEY) if proxy_endpoint.is_none() => {
                    proxy_endpoint = Some(value.to_string());
                }
                _ => (),
            }
        }

        return Self {
            user_pool_id: user_pool_id.unwrap_or_default(),
            user_pool_client_id: user_pool_client_id.unwrap_or_default(),
            proxy_endpoint: proxy_endpoint.unwrap_or_default(),
        };
    }
}

pub struct Stack {
    pub stack_name: String,

    region: Region,
    client: aws_sdk_cloudformation::Client,
}

impl Stack {
    pub async fn new(config_entry: &ConfigEntry) -> Result<Self, Error> {
        let stack_name = config_entry.stack_name().to_string();

        let region = match config_entry.region.as_ref() {
            Some(provided_region) => Some(Region::new(provided_region.clone())),
            None => deployment_region().await,
        };
        let region = match region {
            Some(region) => region,
            None => return Err(Error::MissingRegion(stack_name)),
        };

        let region_for_config = region.clone();
        let sdk_config = aws_config::from_env()
            .region(region_for_config)
            .load()
            .await;
        let client = aws_sdk_cloudformation::Client::new(&sdk_config);

        return Ok(Self {
            stack_name,
            region,
            client,
        });
    }

    /// Region the describe call runs against; also the region the emitted
    /// document advertises.
    pub fn region(&self) -> &str {
        return self.region.as_ref();
    }

    pub async fn resolve_outputs(&self) -> Result<AuthOutputs, Error> {
        let result = self
            .client
            .describe_stacks()
            .stack_name(&self.stack_name)
            .send()
            .await;

        let result = match result {
            Ok(data) => data,
            Err(error) => {
                return Err(Error::Network(self.stack_name.clone(), error.to_string()));
            }
        };

        // The response is a list; duplicates are not disambiguated, the
        // first entry is authoritative.
        let stack = match result.stacks().unwrap_or_default().first() {
            Some(stack) => stack,
            None => {
                return Err(Error::NotFound(
                    self.stack_name.clone(),
                    self.region().to_string(),
                ));
            }
        };

        return Ok(AuthOutputs::from_outputs(stack.outputs().unwrap_or_default()));
    }
}

async fn deployment_region() -> Option<Region> {
    match std::env::var(CDK_REGION_VAR) {
        Ok(region) if !region.is_empty() => Some(Region::new(region)),
        _ => RegionProviderChain::default_provider().region().await,
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_cloudformation::model::Output;

    use super::AuthOutputs;

    fn output(key: &str, value: &str) -> Output {
        return Output::builder()
            .output_key(key)
            .output_value(value)
            .build();
    }

    #[test]
    fn resolves_recognized_keys() {
        let outputs = vec![
            output("UserPoolClientId", "abc123"),
            output("UserPoolId", "us-east-1_XYZ"),
            output("ProxyEndpoint", "https://example.execute-api.us-east-1.amazonaws.com/prod/"),
        ];

        let resolved = AuthOutputs::from_outputs(&outputs);
        assert_eq!("us-east-1_XYZ", resolved.user_pool_id);
        assert_eq!("abc123", resolved.user_pool_client_id);
        assert_eq!(
            "https://example.execute-api.us-east-1.amazonaws.com/prod/",
            resolved.proxy_endpoint
        );
    }

    #[test]
    fn missing_keys_resolve_to_empty_strings() {
        let outputs = vec![output("UserPoolClientId", "abc123")];

        let resolved = AuthOutputs::from_outputs(&outputs);
        assert_eq!("abc123", resolved.user_pool_client_id);
        assert_eq!("", resolved.user_pool_id);
        assert_eq!("", resolved.proxy_endpoint);
    }

    #[test]
    fn empty_outputs_resolve_to_empty_strings() {
        let resolved = AuthOutputs::from_outputs(&[]);
        assert_eq!(AuthOutputs::default(), resolved);
    }

    #[test]
    fn first_entry_wins_for_duplicate_keys() {
        let outputs = vec![
            output("UserPoolId", "us-east-1_FIRST"),
            output("UserPoolId", "us-east-1_SECOND"),
        ];

        let resolved = AuthOutputs::from_outputs(&outputs);
        assert_eq!("us-east-1_FIRST", resolved.user_pool_id);
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let outputs = vec![
            output("DistributionDomainName", "dxxxx.cloudfront.net"),
            output("UserPoolId", "us-east-1_XYZ"),
        ];

        let resolved = AuthOutputs::from_outputs(&outputs);
        assert_eq!("us-east-1_XYZ", resolved.user_pool_id);
        assert_eq!("", resolved.user_pool_client_id);
    }

    #[test]
    fn output_without_a_value_resolves_to_empty_string() {
        let outputs = vec![Output::builder().output_key("UserPoolId").build()];

        let resolved = AuthOutputs::from_outputs(&outputs);
        assert_eq!("", resolved.user_pool_id);
    }
}
