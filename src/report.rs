// Final report rendering: a statistics block followed by one section
// per chunk, successful or not.

/// Outcome of one chunk. `None` means the model call still failed
/// after all retries.
#[derive(Debug, Clone)]
pub struct ChunkSummary {
    pub title: String,
    pub summary: Option<String>,
}

pub fn failed_count(results: &[ChunkSummary]) -> usize {
    results.iter().filter(|r| r.summary.is_none()).count()
}

pub fn render(model: &str, task: &str, results: &[ChunkSummary]) -> String {
    let failed = failed_count(results);
    let mut report = format!(
        "=== 文本分析报告 ===\n\n\
         【统计信息】\n\
         总分块数: {}\n\
         成功处理: {}\n\
         失败分块: {}\n\
         使用模型: {}\n\
         任务说明: {}\n\n\
         【分块结果】\n",
        results.len(),
        results.len() - failed,
        failed,
        model,
        task
    );
    for result in results {
        report.push_str(&format!("\n■ {}\n", result.title));
        match &result.summary {
            Some(text) => {
                report.push_str(text.trim());
                report.push('\n');
            }
            None => report.push_str("（处理失败，未获得模型输出）\n"),
        }
        report.push_str(&"━".repeat(60));
        report.push('\n');
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ChunkSummary> {
        vec![
            ChunkSummary {
                title: "第1章 起点".to_string(),
                summary: Some("主角离家。\n".to_string()),
            },
            ChunkSummary {
                title: "第2章 转折".to_string(),
                summary: None,
            },
            ChunkSummary {
                title: "第3章 归途".to_string(),
                summary: Some("冲突化解。".to_string()),
            },
        ]
    }

    #[test]
    fn statistics_count_failures_exactly() {
        let report = render("qwen:14b", "总结这段内容的要点", &sample());
        assert!(report.contains("总分块数: 3"));
        assert!(report.contains("成功处理: 2"));
        assert!(report.contains("失败分块: 1"));
        assert!(report.contains("使用模型: qwen:14b"));
    }

    #[test]
    fn every_chunk_gets_a_section() {
        let report = render("qwen:14b", "总结", &sample());
        assert!(report.contains("■ 第1章 起点"));
        assert!(report.contains("主角离家。"));
        assert!(report.contains("■ 第2章 转折"));
        assert!(report.contains("（处理失败，未获得模型输出）"));
        assert!(report.contains("■ 第3章 归途"));
    }

    #[test]
    fn summary_text_is_trimmed_into_its_section() {
        let results = vec![ChunkSummary {
            title: "全文".to_string(),
            summary: Some("\n  要点。  \n".to_string()),
        }];
        let report = render("qwen:14b", "总结", &results);
        assert!(report.contains("\n要点。\n"));
    }

    #[test]
    fn empty_results_render_an_empty_statistics_block() {
        let report = render("qwen:14b", "总结", &[]);
        assert!(report.contains("总分块数: 0"));
        assert!(report.contains("失败分块: 0"));
    }
}
