use async_compression::tokio::bufread::{BrotliEncoder, GzipEncoder, ZlibEncoder, ZstdEncoder};
use rocket::get;
use rocket::request::{FromRequest, Outcome};
use rocket::response::{self, Responder};
use rocket::Request;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::io::AsyncReadExt;

#[allow(non_camel_case_types)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub enum CompressionMethod {
    identity,
    gzip,
    deflate,
    br,
    zstd,
}

pub static BODY: &str = "This is the data to be compressed!";

pub struct CompressedData {
    data: Vec<u8>,
    encoding: CompressionMethod,
}

#[derive(Serialize, Deserialize)]
pub struct Payload {
    pub body: String,
    pub encoding: CompressionMethod,
}

impl Payload {
    pub fn new(encoding: CompressionMethod) -> Self {
        Payload {
            body: BODY.to_string(),
            encoding,
        }
    }

    pub async fn compress(self) -> std::io::Result<CompressedData> {
        let json_serialized = json!(self).to_string();
        let buf_read = std::io::Cursor::new(json_serialized.as_bytes());

        let mut compressed: Vec<u8> = Vec::new();

        // HTTP `deflate` is the zlib format.
        match self.encoding {
            CompressionMethod::gzip => GzipEncoder::new(buf_read).read_to_end(&mut compressed).await?,
            CompressionMethod::deflate => ZlibEncoder::new(buf_read).read_to_end(&mut compressed).await?,
            CompressionMethod::br => BrotliEncoder::new(buf_read).read_to_end(&mut compressed).await?,
            CompressionMethod::zstd => ZstdEncoder::new(buf_read).read_to_end(&mut compressed).await?,
            CompressionMethod::identity => {
                compressed.extend_from_slice(json_serialized.as_bytes());
                compressed.len()
            },
        };

        Ok(CompressedData {
            data: compressed,
            encoding: self.encoding,
        })
    }
}

impl<'r> Responder<'r, 'static> for CompressedData {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        response::Response::build()
            .header(rocket::http::Header::new("Content-Encoding", format!("{:?}", self.encoding)))
            .header(rocket::http::ContentType::JSON)
            .sized_body(self.data.len(), std::io::Cursor::new(self.data))
            .ok()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CompressionMethod {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let accept_encoding = req
            .headers()
            .get_one("accept-encoding")
            .unwrap_or_default()
            .to_lowercase();

        let compression_method = match accept_encoding.as_str() {
            "gzip" => CompressionMethod::gzip,
            "deflate" => CompressionMethod::deflate,
            "br" => CompressionMethod::br,
            "zstd" => CompressionMethod::zstd,
            _ => CompressionMethod::identity,
        };

        Outcome::Success(compression_method)
    }
}

#[get("/compression")]
pub async fn compression_route(compression_method: CompressionMethod) -> std::io::Result<CompressedData> {
    Payload::new(compression_method).compress().await
}
