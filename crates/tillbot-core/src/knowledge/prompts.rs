//! Fixed textual assets: the base knowledge document and prompt templates.
//!
//! Loaded once at process start as consts; content is owned by the support
//! team, not by this pipeline.

/// Placeholder substituted with the composed knowledge base.
pub const KNOWLEDGE_BASE_PLACEHOLDER: &str = "{{KNOWLEDGE_BASE}}";

/// System prompt template for the support assistant. Establishes persona,
/// the Chinese-only language policy, and the answer-only-from-knowledge
/// policy.
pub const SYSTEM_PROMPT_TEMPLATE: &str = r#"你是一位专业的收银系统（POS）技术支持客服。你的任务是根据下方提供的知识库内容，回答用户关于收银系统的技术问题。

规则：
1. 只能依据知识库中的内容回答问题，不要编造知识库以外的信息。
2. 如果知识库中没有覆盖用户的问题，请明确告知用户该问题暂未收录，并建议联系人工客服。
3. 回答必须使用中文，语气专业、耐心、简洁。
4. 如果用户的问题与收银系统无关，请礼貌地说明你只能解答收银系统相关的问题。

知识库：
{{KNOWLEDGE_BASE}}
"#;

/// Base knowledge document: numbered support entries for the POS product.
pub const BASE_KNOWLEDGE: &str = r#"**基础知识库:**
1. **收银机无法开机怎么办？**
   * 请先检查电源线是否插紧，电源指示灯是否亮起。若指示灯不亮，请更换插座测试；若仍无法开机，请联系售后更换电源适配器。
2. **小票打印机不出纸怎么办？**
   * 请确认打印纸安装方向正确（热敏面朝下），并检查打印机舱盖是否完全合上。若仍不出纸，请在系统设置中执行打印机自检。
3. **扫码枪扫不出商品怎么办？**
   * 请先确认扫码枪指示灯是否亮起，再检查商品条码是否已录入系统。可在"商品管理"中搜索条码确认。
4. **如何进行日结对账？**
   * 在主界面点击"交接班"，核对现金、刷卡、扫码三类收款金额后点击"日结"，系统会自动生成日结报表并上传。
5. **会员余额显示不正确怎么办？**
   * 请先在"会员管理"中刷新会员信息。若多台设备同时操作同一会员，余额同步可能有延迟，等待约一分钟后重试。
6. **收银系统如何连接后厨打印机？**
   * 进入"设置 - 外设管理 - 网口打印机"，输入后厨打印机的 IP 地址并点击"测试打印"，成功后保存即可。
7. **忘记管理员密码怎么办？**
   * 请使用注册时的手机号在登录页点击"忘记密码"进行重置。若手机号已停用，请联系客服提交工单人工重置。
8. **断网了还能收银吗？**
   * 可以。系统支持离线收银，交易数据会暂存在本机，网络恢复后自动上传。注意离线期间无法使用会员储值支付。
"#;

/// Instruction prompt for schema-constrained Q&A extraction from an
/// uploaded document.
pub const EXTRACTION_PROMPT: &str = "你是一位技术文档专家。分析这份文档并提取所有有用的技术支持问答对 (Q&A)。忽略无关信息。务必用中文提取。结果以 JSON 数组形式返回。";

/// Fallback reply when the provider returns no text.
pub const NO_ANSWER_FALLBACK: &str = "抱歉，我无法生成回答。";

/// Fallback reply when the provider call fails.
pub const BUSY_FALLBACK: &str = "系统繁忙，请稍后再试。";
