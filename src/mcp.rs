use crate::errors::SummarizeError;
use crate::nlp::Stopwords;
use crate::summarize::{build_summarizer, SentencesCount, Summarizer, SummarizerSettings};
use serde::Deserialize;
use serde_json::json;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const SERVER_NAME: &str = "luhn-summarizer";

// Global switch: once we detect raw JSON (no Content-Length) from the client,
// we reply in ND-JSON (one JSON per line, no headers).
static RAW_JSON_MODE: AtomicBool = AtomicBool::new(false);

pub struct StdioMcpServer {
    settings: SummarizerSettings,
    summarizer: Arc<dyn Summarizer>,
    default_count: SentencesCount,
}

impl StdioMcpServer {
    pub fn new(
        settings: SummarizerSettings,
        summarizer: Arc<dyn Summarizer>,
        default_count: SentencesCount,
    ) -> Self {
        Self {
            settings,
            summarizer,
            default_count,
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut reader = std::io::BufReader::new(stdin.lock());
        let mut writer = std::io::BufWriter::new(stdout.lock());
        tracing::info!("run loop started: waiting for framed MCP requests on stdin");
        loop {
            let msg = match read_framed_message_buf(&mut reader) {
                Ok(m) => m,
                Err(e) => {
                    tracing::debug!(error=?e, "stdin closed or invalid frame");
                    break;
                }
            };
            let req: serde_json::Value = match serde_json::from_slice(&msg) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error=?e, "invalid JSON");
                    continue;
                }
            };

            let method = req.get("method").and_then(|m| m.as_str()).unwrap_or("");
            let id_opt = req.get("id").cloned();
            let id_reply = id_opt.as_ref().filter(|v| !v.is_null()).cloned();
            tracing::info!(%method, id=?id_opt, "received request");
            match method {
                "initialize" => {
                    let params = req.get("params").cloned().unwrap_or(json!({}));
                    let client_proto = params
                        .get("protocolVersion")
                        .and_then(|x| x.as_str())
                        .unwrap_or("2024-11-05");
                    let result = json!({
                        "protocolVersion": client_proto,
                        "capabilities": {
                            "tools": {"list": true, "call": true},
                            "prompts": {"list": true},
                            "resources": {"list": true, "read": false, "subscribe": false}
                        },
                        "serverInfo": server_info()
                    });
                    if let Some(id) = id_reply.clone() {
                        write_response(&mut writer, id, result)?;
                    }
                }
                "server/info" => {
                    if let Some(id) = id_reply.clone() {
                        write_response(&mut writer, id, json!({"serverInfo": server_info()}))?;
                    }
                }
                "tools/list" => {
                    let tools = list_tools_schema();
                    if let Some(id) = id_reply.clone() {
                        write_response(&mut writer, id, json!({"tools": tools}))?;
                    }
                }
                "prompts/list" => {
                    if let Some(id) = id_reply.clone() {
                        write_response(&mut writer, id, json!({"prompts": []}))?;
                    }
                }
                "resources/list" => {
                    if let Some(id) = id_reply.clone() {
                        write_response(&mut writer, id, json!({"resources": []}))?;
                    }
                }
                "tools/call" => {
                    let params = req.get("params").cloned().unwrap_or(json!({}));
                    let name = params.get("name").and_then(|x| x.as_str()).unwrap_or("");
                    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
                    let result = self.dispatch_tool(name, arguments).await;
                    match result {
                        Ok(v) => {
                            if let Some(id) = id_reply.clone() {
                                write_response(
                                    &mut writer,
                                    id,
                                    json!({"content": [{"type":"json","json": v}], "isError": false}),
                                )?;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(tool=%name, error=%e, "tool call failed");
                            if let Some(id) = id_reply.clone() {
                                write_error(&mut writer, id, -32001, &format!("{}", e))?;
                            }
                        }
                    }
                }
                _ => {
                    // Do not respond to notifications (no id)
                    if let Some(id) = id_reply.clone() {
                        write_error(&mut writer, id, -32601, "method not found")?;
                    }
                }
            }
        }
        Ok(())
    }

    async fn dispatch_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        match name {
            "summarize" => {
                let p: SummarizeParams = serde_json::from_value(arguments)?;
                let summarizer = self.summarizer_for(&p.overrides)?;
                let count = p.sentences_count.unwrap_or(self.default_count);
                let text = p.text;
                let res = tokio::task::spawn_blocking(move || summarizer.summarize(&text, count))
                    .await??;
                tracing::info!(
                    backend=%res.backend,
                    selected=res.sentences.len(),
                    sentences_total=res.sentences_total,
                    "summarized text"
                );
                Ok(serde_json::to_value(res)?)
            }
            "rate_sentences" => {
                let p: RateParams = serde_json::from_value(arguments)?;
                let summarizer = self.summarizer_for(&p.overrides)?;
                let backend = summarizer.backend();
                let text = p.text;
                let ratings = tokio::task::spawn_blocking(move || summarizer.rate(&text)).await??;
                Ok(json!({"ratings": ratings, "backend": backend}))
            }
            "health_check" => Ok(json!({
                "backend": self.summarizer.backend(),
                "server": server_info()
            })),
            _ => anyhow::bail!("unknown tool: {name}"),
        }
    }

    /// The shared summarizer, or a request-scoped one when arguments
    /// override its settings.
    fn summarizer_for(
        &self,
        overrides: &Overrides,
    ) -> Result<Arc<dyn Summarizer>, SummarizeError> {
        if overrides.is_empty() {
            return Ok(self.summarizer.clone());
        }
        let mut settings = self.settings.clone();
        if let Some(gap) = overrides.max_gap_size {
            settings.luhn.max_gap_size = gap;
        }
        if let Some(pct) = overrides.significant_percentage {
            settings.luhn.significant_percentage = pct;
        }
        if let Some(name) = &overrides.stopwords {
            settings.luhn.stopwords = Stopwords::by_name(name)?;
        }
        if let Some(extra) = &overrides.extra_stopwords {
            settings.luhn.stopwords.extend(extra);
        }
        if let Some(stemmer) = &overrides.stemmer {
            settings.stemmer = stemmer.clone();
        }
        tracing::debug!(?overrides, "building request-scoped summarizer");
        build_summarizer(&settings)
    }
}

fn server_info() -> serde_json::Value {
    json!({"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")})
}

fn list_tools_schema() -> Vec<serde_json::Value> {
    let overrides = json!({
        "max_gap_size": {"type":"integer","minimum":1},
        "significant_percentage": {"type":"number","minimum":0,"maximum":1},
        "stopwords": {"type":"string","description":"built-in list by language (english, german, ...) or none"},
        "extra_stopwords": {"type":"array","items":{"type":"string"}},
        "stemmer": {"type":"string","description":"snowball language (english, german, ...) or none"}
    });
    let with_overrides = |extra: serde_json::Value| {
        let mut props = overrides.clone();
        if let (Some(props), Some(extra)) = (props.as_object_mut(), extra.as_object()) {
            props.extend(extra.clone());
        }
        props
    };
    vec![
        json!({"name":"summarize","description":"Extract the highest rated sentences of a text in reading order","inputSchema":{"type":"object","required":["text"],"properties": with_overrides(json!({
            "text": {"type":"string"},
            "sentences_count": {"type":["integer","string"],"description":"Number of sentences, or a percentage such as \"20%\""}
        }))}}),
        json!({"name":"rate_sentences","description":"Rate every sentence of a text","inputSchema":{"type":"object","required":["text"],"properties": with_overrides(json!({
            "text": {"type":"string"}
        }))}}),
        json!({"name":"health_check","description":"Report the active backend and server version","inputSchema": {"type":"object","properties":{}}}),
    ]
}

fn read_framed_message_buf<R: std::io::BufRead>(bufreader: &mut R) -> anyhow::Result<Vec<u8>> {
    let mut header = String::new();
    let mut content_length: Option<usize> = None;
    let mut header_lines: usize = 0;
    loop {
        header.clear();
        let n = bufreader.read_line(&mut header)?;
        if n == 0 {
            anyhow::bail!("eof");
        }
        let line = header.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }
        header_lines += 1;
        tracing::trace!(%line, "framing header line");
        // Fallback for clients that send newline-delimited raw JSON instead of framed headers
        if header_lines == 1 && line.starts_with('{') && line.contains("\"jsonrpc\"") {
            tracing::debug!("detected raw JSON line without Content-Length; accepting as body");
            RAW_JSON_MODE.store(true, Ordering::Relaxed);
            return Ok(line.as_bytes().to_vec());
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = Some(value.trim().parse::<usize>()?);
            }
        }
    }
    let len = content_length.ok_or_else(|| anyhow::anyhow!("missing Content-Length"))?;
    let mut body = vec![0u8; len];
    bufreader.read_exact(&mut body)?;
    tracing::trace!(header_lines, content_length = len, "framed message parsed");
    Ok(body)
}

fn write_response<W: Write>(
    writer: &mut W,
    id: serde_json::Value,
    result: serde_json::Value,
) -> anyhow::Result<()> {
    let resp = json!({"jsonrpc":"2.0","id": id, "result": result});
    write_framed(writer, &resp)
}

fn write_error<W: Write>(
    writer: &mut W,
    id: serde_json::Value,
    code: i64,
    message: &str,
) -> anyhow::Result<()> {
    let resp = json!({"jsonrpc":"2.0","id": id, "error": {"code": code, "message": message}});
    write_framed(writer, &resp)
}

fn write_framed<W: Write>(writer: &mut W, v: &serde_json::Value) -> anyhow::Result<()> {
    let s = serde_json::to_string(v)?;
    let force_ndjson = std::env::var("MCP_FORCE_NDJSON").ok().as_deref() == Some("1");
    if force_ndjson || RAW_JSON_MODE.load(Ordering::Relaxed) {
        writeln!(writer, "{}", s)?;
    } else {
        write!(writer, "Content-Length: {}\r\n\r\n{}", s.len(), s)?;
    }
    writer.flush()?;
    Ok(())
}

// Wire structs for tool params
#[derive(Debug, Default, Deserialize)]
struct Overrides {
    max_gap_size: Option<usize>,
    significant_percentage: Option<f64>,
    stopwords: Option<String>,
    extra_stopwords: Option<Vec<String>>,
    stemmer: Option<String>,
}

impl Overrides {
    fn is_empty(&self) -> bool {
        self.max_gap_size.is_none()
            && self.significant_percentage.is_none()
            && self.stopwords.is_none()
            && self.extra_stopwords.is_none()
            && self.stemmer.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct SummarizeParams {
    text: String,
    sentences_count: Option<SentencesCount>,
    #[serde(flatten)]
    overrides: Overrides,
}

#[derive(Debug, Deserialize)]
struct RateParams {
    text: String,
    #[serde(flatten)]
    overrides: Overrides,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::{LuhnConfig, RatedSentence, SummarizeResult};

    const TEXT: &str = "The cat sat on the mat. Dogs run fast.";

    struct DummySummarizer;
    impl Summarizer for DummySummarizer {
        fn summarize(
            &self,
            text: &str,
            count: SentencesCount,
        ) -> Result<SummarizeResult, SummarizeError> {
            Ok(SummarizeResult {
                summary: text.chars().take(8).collect(),
                sentences: Vec::new(),
                sentences_total: count.resolve(10),
                backend: "dummy".into(),
            })
        }

        fn rate(&self, _text: &str) -> Result<Vec<RatedSentence>, SummarizeError> {
            Ok(Vec::new())
        }

        fn backend(&self) -> &'static str {
            "dummy"
        }
    }

    fn luhn_server() -> StdioMcpServer {
        let settings = SummarizerSettings {
            luhn: LuhnConfig::with_stopwords(Stopwords::from_list(["the", "a"])),
            ..SummarizerSettings::default()
        };
        let summarizer = build_summarizer(&settings).expect("summarizer");
        StdioMcpServer::new(settings, summarizer, SentencesCount::Absolute(1))
    }

    #[test]
    fn framed_write_and_read_roundtrip() {
        let v = serde_json::json!({"jsonrpc":"2.0","id":1,"result":{"ok":true}});
        let mut out = Vec::new();
        write_framed(&mut out, &v).expect("write");
        let mut cursor = std::io::Cursor::new(out);
        let mut bufreader = std::io::BufReader::new(&mut cursor);
        let body = read_framed_message_buf(&mut bufreader).expect("read");
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed, v);
    }

    #[test]
    fn raw_json_line_is_accepted_as_body() {
        let line = "{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"tools/list\"}\n";
        let mut bufreader = std::io::BufReader::new(line.as_bytes());
        let body = read_framed_message_buf(&mut bufreader).expect("read");
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.get("id").and_then(|x| x.as_i64()), Some(7));
    }

    #[test]
    fn missing_content_length_is_an_error() {
        let mut bufreader = std::io::BufReader::new("Content-Type: json\r\n\r\n{}".as_bytes());
        assert!(read_framed_message_buf(&mut bufreader).is_err());
    }

    #[test]
    fn tool_schema_lists_all_tools() {
        let names: Vec<String> = list_tools_schema()
            .iter()
            .filter_map(|t| t.get("name").and_then(|n| n.as_str()).map(String::from))
            .collect();
        assert_eq!(names, vec!["summarize", "rate_sentences", "health_check"]);
        let summarize = &list_tools_schema()[0];
        let props = &summarize["inputSchema"]["properties"];
        assert!(props.get("text").is_some());
        assert!(props.get("max_gap_size").is_some());
        assert!(props.get("stemmer").is_some());
    }

    #[tokio::test]
    async fn dispatch_summarize_uses_default_count() {
        let server = luhn_server();
        let res = server
            .dispatch_tool("summarize", serde_json::json!({ "text": TEXT }))
            .await
            .unwrap();
        assert_eq!(res.get("backend").and_then(|x| x.as_str()), Some("luhn"));
        assert_eq!(res.get("sentences_total").and_then(|x| x.as_u64()), Some(2));
        assert_eq!(
            res.get("summary").and_then(|x| x.as_str()),
            Some("The cat sat on the mat.")
        );
    }

    #[tokio::test]
    async fn dispatch_summarize_accepts_percentage_count() {
        let server = luhn_server();
        let res = server
            .dispatch_tool(
                "summarize",
                serde_json::json!({ "text": TEXT, "sentences_count": "100%" }),
            )
            .await
            .unwrap();
        let sentences = res.get("sentences").and_then(|x| x.as_array()).unwrap();
        assert_eq!(sentences.len(), 2);
    }

    #[tokio::test]
    async fn dispatch_rate_sentences_with_overrides() {
        let server = luhn_server();
        let res = server
            .dispatch_tool(
                "rate_sentences",
                serde_json::json!({ "text": TEXT, "stopwords": "none", "extra_stopwords": ["the"] }),
            )
            .await
            .unwrap();
        let ratings = res.get("ratings").and_then(|x| x.as_array()).unwrap();
        assert_eq!(ratings.len(), 2);
        let first = ratings[0].get("rating").and_then(|x| x.as_f64()).unwrap();
        assert!((first - 3.2).abs() < 1e-9);
        assert_eq!(ratings[1].get("rating").and_then(|x| x.as_f64()), Some(3.0));
    }

    #[tokio::test]
    async fn dispatch_rate_sentences_with_stemmer_override() {
        let server = luhn_server();
        let args = serde_json::json!({
            "text": "Cat cats. Ant ant.",
            "significant_percentage": 0.67,
            "stemmer": "english"
        });
        let res = server.dispatch_tool("rate_sentences", args).await.unwrap();
        let ratings: Vec<f64> = res["ratings"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r.get("rating").and_then(|x| x.as_f64()))
            .collect();
        assert_eq!(ratings, vec![0.0, 2.0]);
    }

    #[tokio::test]
    async fn dispatch_rejects_invalid_overrides_and_unknown_tools() {
        let server = luhn_server();
        let bad_gap = server
            .dispatch_tool("summarize", serde_json::json!({ "text": TEXT, "max_gap_size": 0 }))
            .await;
        assert!(bad_gap.is_err());
        let missing_text = server
            .dispatch_tool("summarize", serde_json::json!({}))
            .await;
        assert!(missing_text.is_err());
        let bad_stemmer = server
            .dispatch_tool("summarize", serde_json::json!({ "text": TEXT, "stemmer": "klingon" }))
            .await;
        assert!(bad_stemmer.is_err());
        let unknown = server
            .dispatch_tool("create_agent", serde_json::json!({}))
            .await;
        assert!(unknown.is_err());
    }

    #[tokio::test]
    async fn dispatch_routes_to_injected_summarizer() {
        let server = StdioMcpServer::new(
            SummarizerSettings::default(),
            Arc::new(DummySummarizer),
            SentencesCount::Absolute(4),
        );
        let res = server
            .dispatch_tool("summarize", serde_json::json!({ "text": "abcdefghijk" }))
            .await
            .unwrap();
        assert_eq!(res.get("backend").and_then(|x| x.as_str()), Some("dummy"));
        assert_eq!(res.get("summary").and_then(|x| x.as_str()), Some("abcdefgh"));
        assert_eq!(res.get("sentences_total").and_then(|x| x.as_u64()), Some(4));

        let health = server
            .dispatch_tool("health_check", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(health.get("backend").and_then(|x| x.as_str()), Some("dummy"));
        assert_eq!(health["server"]["name"], SERVER_NAME);
    }
}
