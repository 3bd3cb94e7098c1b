mod common;

use anyhow::Result;
use common::{api_for, TOKEN};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_create_menu_sends_unescaped_utf8() -> Result<()> {
    let server = MockServer::start_async().await;
    let menu = json!({
        "button": [
            {"type": "click", "name": "今日歌曲", "key": "V1001_TODAY_MUSIC"},
            {"type": "view", "name": "搜索", "url": "http://www.soso.com/"}
        ]
    });
    let expected_body = serde_json::to_string(&menu)?;
    assert!(expected_body.contains("今日歌曲"));

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/menu/create")
                .query_param("access_token", TOKEN)
                .body(expected_body.clone());
            then.status(200).json_body(json!({"errcode": 0, "errmsg": "ok"}));
        })
        .await;

    let data = api_for(&server).create_menu(&menu).await?;

    mock.assert_async().await;
    assert_eq!(data["errmsg"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_conditional_menu_lifecycle() -> Result<()> {
    let server = MockServer::start_async().await;
    let menu = json!({
        "button": [{"type": "click", "name": "Sales", "key": "SALES"}],
        "matchrule": {"tag_id": "2", "sex": "1"}
    });

    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/menu/addconditional")
                .json_body(menu.clone());
            then.status(200).json_body(json!({"menuid": "208379533"}));
        })
        .await;
    let try_match = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/menu/trymatch")
                .json_body(json!({"user_id": "weixin"}));
            then.status(200)
                .json_body(json!({"button": [{"type": "click", "name": "Sales", "key": "SALES"}]}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/menu/delconditional")
                .json_body(json!({"menuid": "208379533"}));
            then.status(200).json_body(json!({"errcode": 0, "errmsg": "ok"}));
        })
        .await;

    let api = api_for(&server);
    let created = api.create_conditional_menu(&menu).await?;
    let menu_id = created["menuid"].as_str().unwrap_or_default().to_string();
    let matched = api.check_personalized_menu_match("weixin").await?;
    let deleted = api.del_conditional_menu(&menu_id).await?;

    create.assert_async().await;
    try_match.assert_async().await;
    delete.assert_async().await;
    assert_eq!(matched["button"][0]["key"], "SALES");
    assert_eq!(deleted["errcode"], 0);
    Ok(())
}

#[tokio::test]
async fn test_get_and_delete_all_menus() -> Result<()> {
    let server = MockServer::start_async().await;
    let get = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cgi-bin/menu/get")
                .query_param("access_token", TOKEN);
            then.status(200).json_body(json!({"menu": {"button": []}}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/cgi-bin/menu/delete")
                .query_param("access_token", TOKEN);
            then.status(200).json_body(json!({"errcode": 0, "errmsg": "ok"}));
        })
        .await;

    let api = api_for(&server);
    let menus = api.get_menus().await?;
    api.del_all_menus().await?;

    get.assert_async().await;
    delete.assert_async().await;
    assert!(menus["menu"]["button"].as_array().is_some());
    Ok(())
}

#[tokio::test]
async fn test_group_operations_send_expected_bodies() -> Result<()> {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/cgi-bin/groups/get");
            then.status(200).json_body(json!({"groups": [{"id": 0, "name": "未分组", "count": 72596}]}));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/groups/create")
                .json_body(json!({"group": {"name": "test"}}));
            then.status(200).json_body(json!({"group": {"id": 107, "name": "test"}}));
        })
        .await;
    let rename = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/groups/update")
                .json_body(json!({"group": {"id": 107, "name": "renamed"}}));
            then.status(200).json_body(json!({"errcode": 0, "errmsg": "ok"}));
        })
        .await;
    let move_user = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/groups/members/update")
                .json_body(json!({"openid": "OPENID", "to_groupid": 107}));
            then.status(200).json_body(json!({"errcode": 0, "errmsg": "ok"}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/groups/delete")
                .json_body(json!({"group": {"id": 107}}));
            then.status(200).json_body(json!({"errcode": 0, "errmsg": "ok"}));
        })
        .await;

    let api = api_for(&server);
    let groups = api.get_all_groups().await?;
    let created = api.create_group("test").await?;
    api.change_group_name(107, "renamed").await?;
    api.change_user_group("OPENID", 107).await?;
    api.del_group(107).await?;

    list.assert_async().await;
    create.assert_async().await;
    rename.assert_async().await;
    move_user.assert_async().await;
    delete.assert_async().await;
    assert_eq!(groups["groups"][0]["name"], "未分组");
    assert_eq!(created["group"]["id"], 107);
    Ok(())
}

#[tokio::test]
async fn test_unchecked_methods_return_errcode_body() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/cgi-bin/groups/get");
            then.status(200)
                .json_body(json!({"errcode": 40001, "errmsg": "invalid credential"}));
        })
        .await;

    let data = api_for(&server).get_all_groups().await?;
    assert_eq!(data["errcode"], 40001);
    Ok(())
}

#[tokio::test]
async fn test_materials_and_qrcodes() -> Result<()> {
    let server = MockServer::start_async().await;
    let materials = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cgi-bin/material/batchget_material")
                .json_body(json!({"type": "news", "offset": 0, "count": 20}));
            then.status(200)
                .json_body(json!({"total_count": 1, "item_count": 1, "item": []}));
        })
        .await;
    let temporary = server
        .mock_async(|when, then| {
            when.method(POST).path("/cgi-bin/qrcode/create").json_body(json!({
                "expire_seconds": 604800,
                "action_name": "QR_SCENE",
                "action_info": {"scene": {"scene_id": 123}}
            }));
            then.status(200)
                .json_body(json!({"ticket": "T1", "expire_seconds": 604800, "url": "http://weixin.qq.com/q/1"}));
        })
        .await;
    let permanent = server
        .mock_async(|when, then| {
            when.method(POST).path("/cgi-bin/qrcode/create").json_body(json!({
                "action_name": "QR_LIMIT_SCENE",
                "action_info": {"scene": {"scene_id": 7}}
            }));
            then.status(200).json_body(json!({"ticket": "T2", "url": "http://weixin.qq.com/q/2"}));
        })
        .await;
    let permanent_str = server
        .mock_async(|when, then| {
            when.method(POST).path("/cgi-bin/qrcode/create").json_body(json!({
                "action_name": "QR_LIMIT_STR_SCENE",
                "action_info": {"scene": {"scene_str": "promo"}}
            }));
            then.status(200).json_body(json!({"ticket": "T3", "url": "http://weixin.qq.com/q/3"}));
        })
        .await;

    let api = api_for(&server);
    let listed = api.get_materials("news", 0, 20).await?;
    let t1 = api.create_scene_qrcode(123, 604800).await?;
    let t2 = api.create_limit_scene_qrcode(7).await?;
    let t3 = api.create_limit_str_scene_qrcode("promo").await?;

    materials.assert_async().await;
    temporary.assert_async().await;
    permanent.assert_async().await;
    permanent_str.assert_async().await;
    assert_eq!(listed["total_count"], 1);
    assert_eq!(t1["ticket"], "T1");
    assert_eq!(t2["ticket"], "T2");
    assert_eq!(t3["ticket"], "T3");
    Ok(())
}
