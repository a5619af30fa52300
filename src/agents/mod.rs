mod gemini;

pub use gemini::GeminiAgent;
