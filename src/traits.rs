use std::path::Path;

use crate::errors::Result;
use crate::mode::AttributeOperation;

/// ヘッダー属性を1つだけ書き換えて画像をコピーする外部ツールの抽象化
///
/// バッチ処理はこのtraitにのみ依存し、実プロセスとテスト用レコーダーを差し替えられる
pub trait AttributeTool {
    /// `input` を `output` へコピーし、ヘッダーに `operation` を適用
    ///
    /// `threads` はツール内部の並列処理へのヒント
    fn apply(
        &self,
        input: &Path,
        operation: &AttributeOperation,
        threads: Option<usize>,
        output: &Path,
    ) -> Result<()>;

    /// ログ出力用の名前
    fn name(&self) -> String;
}
