use std::time::Duration;

/// 程序配置
///
/// 所有字段在运行开始前确定，运行期间不可变。
/// 测试时可以直接构造（例如把重试间隔设为 0）。
#[derive(Clone, Debug)]
pub struct Config {
    /// 输入 CSV 文件路径（必须包含 image_url 列）
    pub input_csv: String,
    /// 输出 CSV 文件路径
    pub output_csv: String,
    /// 是否跳过页面上已有人工 ALT 文本的图片
    pub skip_existing_alt: bool,
    /// 最大并发 worker 数量
    pub max_workers: usize,
    /// 单次图片下载超时
    pub fetch_timeout: Duration,
    /// 单次推理请求超时（推理是计算密集型，远大于下载超时）
    pub inference_timeout: Duration,
    /// 网络调用最大尝试次数
    pub max_retries: usize,
    /// 两次尝试之间的固定间隔
    pub retry_backoff: Duration,
    /// Ollama 服务地址
    pub ollama_base_url: String,
    /// 视觉模型名称
    pub model_name: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_csv: "images.csv".to_string(),
            output_csv: "alt_text_results.csv".to_string(),
            skip_existing_alt: true,
            max_workers: 6,
            fetch_timeout: Duration::from_secs(10),
            inference_timeout: Duration::from_secs(180),
            max_retries: 3,
            retry_backoff: Duration::from_secs(1),
            ollama_base_url: "http://localhost:11434".to_string(),
            model_name: "llava".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_csv: std::env::var("INPUT_CSV").unwrap_or(default.input_csv),
            output_csv: std::env::var("OUTPUT_CSV").unwrap_or(default.output_csv),
            skip_existing_alt: std::env::var("SKIP_EXISTING_ALT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.skip_existing_alt),
            max_workers: std::env::var("MAX_WORKERS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_workers),
            fetch_timeout: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).map(Duration::from_secs).unwrap_or(default.fetch_timeout),
            inference_timeout: std::env::var("INFERENCE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).map(Duration::from_secs).unwrap_or(default.inference_timeout),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            retry_backoff: std::env::var("RETRY_BACKOFF_MS").ok().and_then(|v| v.parse().ok()).map(Duration::from_millis).unwrap_or(default.retry_backoff),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL").unwrap_or(default.ollama_base_url),
            model_name: std::env::var("MODEL_NAME").unwrap_or(default.model_name),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
