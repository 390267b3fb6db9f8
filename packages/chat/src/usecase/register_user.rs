//! UseCase: ユーザー登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterUserUseCase::execute() メソッド
//! - パスワード確認、ユーザー名の重複チェック
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ユーザーの登録
//! - 異常系：パスワード不一致、ユーザー名の重複、ストアの障害

use std::sync::Arc;

use crate::domain::{Email, Identity, IdentityRepository, Password, RepositoryError, Username};

use super::error::RegisterError;

/// 登録フォームの入力（検証済みの Value Object）
#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub username: Username,
    pub email: Email,
    pub password: Password,
    /// 確認用パスワード
    pub password_confirmation: Password,
}

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    /// Repository（データアクセス層の抽象化）
    identities: Arc<dyn IdentityRepository>,
}

impl RegisterUserUseCase {
    /// 新しい RegisterUserUseCase を作成
    pub fn new(identities: Arc<dyn IdentityRepository>) -> Self {
        Self { identities }
    }

    /// ユーザー登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - 登録されたユーザー
    /// * `Err(RegisterError)` - 登録失敗
    pub async fn execute(&self, input: RegisterUserInput) -> Result<Identity, RegisterError> {
        // 1. パスワード確認
        if input.password != input.password_confirmation {
            return Err(RegisterError::PasswordMismatch);
        }

        // 2. 重複チェック
        if self
            .identities
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(RegisterError::UsernameTaken(
                input.username.into_string(),
            ));
        }

        // 3. パスワードの保存はストアに委譲
        // 2. と 3. の間に同じ名前で登録された場合もストアの Conflict で検出する
        let username = input.username.as_str().to_string();
        let identity = self
            .identities
            .register(input.username, input.email, input.password)
            .await
            .map_err(|error| match error {
                RepositoryError::Conflict(_) => RegisterError::UsernameTaken(username),
                other => other.into(),
            })?;

        tracing::info!(user_id = %identity.id, username = %identity.username, "User registered");
        Ok(identity)
    }
}
