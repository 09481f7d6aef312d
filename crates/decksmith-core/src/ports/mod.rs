//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」です。
//! コーパス（カード DB / コンボ DB）はネットワーク越しの外部サービスという前提で、
//! エンジンは trait 越しにしか触りません。
//! テストでは決定的なフェイク実装に差し替えます。

pub mod card_corpus;
pub mod combo_corpus;

pub use self::card_corpus::CardCorpus;
pub use self::combo_corpus::ComboCorpus;
