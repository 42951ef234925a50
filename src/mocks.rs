use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::errors::{Result, TagError};
use crate::mode::AttributeOperation;
use crate::traits::AttributeTool;

/// [`RecordingTool::apply`] の呼び出し記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub operation: AttributeOperation,
    pub threads: Option<usize>,
    pub output: PathBuf,
}

/// テスト用のモック属性ツール
///
/// 入力をそのまま出力へコピーし、操作内容を1行追記する
#[derive(Debug, Default)]
pub struct RecordingTool {
    invocations: Mutex<Vec<Invocation>>,
    failing: HashSet<PathBuf>,
}

impl RecordingTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイル名が `file_name` の入力で終了コード1の失敗を返す
    pub fn failing_on(mut self, file_name: impl Into<PathBuf>) -> Self {
        self.failing.insert(file_name.into());
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.invocations.lock().len()
    }
}

impl AttributeTool for RecordingTool {
    fn apply(
        &self,
        input: &Path,
        operation: &AttributeOperation,
        threads: Option<usize>,
        output: &Path,
    ) -> Result<()> {
        self.invocations.lock().push(Invocation {
            input: input.to_path_buf(),
            operation: operation.clone(),
            threads,
            output: output.to_path_buf(),
        });

        if let Some(name) = input.file_name() {
            if self.failing.contains(Path::new(name)) {
                return Err(TagError::ToolFailed {
                    path: input.to_path_buf(),
                    code: Some(1),
                });
            }
        }

        let mut contents = fs::read(input).map_err(|e| TagError::FileSystem {
            path: input.to_path_buf(),
            operation: "read input".to_string(),
            source: e,
        })?;
        contents.extend_from_slice(format!("\n{}\n", operation).as_bytes());
        fs::write(output, contents).map_err(|e| TagError::FileSystem {
            path: output.to_path_buf(),
            operation: "write output".to_string(),
            source: e,
        })
    }

    fn name(&self) -> String {
        "recording-tool".to_string()
    }
}
