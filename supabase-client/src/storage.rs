use reqwest::header::CONTENT_TYPE;

use crate::Client;
use crate::error::Error;

/// Object storage: upload named blobs and derive their public URLs.
pub struct StorageApi<'a> {
    pub(crate) client: &'a Client,
}

impl StorageApi<'_> {
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), Error> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.client.base_url, bucket, path
        );
        let resp = self
            .client
            .request(reqwest::Method::POST, url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Error::from_response(resp).await)
        }
    }

    /// Public URL for an object in a public bucket. Pure string
    /// construction; no request is made and existence is not checked.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.client.base_url, bucket, path
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::Client;

    #[test]
    fn public_url_points_at_the_public_object_route() {
        let client = Client::new("https://example.supabase.co", "anon").unwrap();
        assert_eq!(
            client.storage().public_url("posts-images", "cover.png-1722643200000"),
            "https://example.supabase.co/storage/v1/object/public/posts-images/cover.png-1722643200000"
        );
    }
}
